pub mod feeds;
pub mod follows;
pub mod users;

use crate::cli::middleware::logged_in;
use crate::cli::registry::Commands;

pub use feeds::{AddFeed, Agg, Feeds, AGG_FEED_URL};
pub use follows::{Follow, Following, Unfollow};
pub use users::{Login, Register, Reset, Users};

/// Every command gator knows, with login gating applied.
pub fn default_registry() -> Commands {
    let mut commands = Commands::new();

    commands.register("register", Register);
    commands.register("login", Login);
    commands.register("reset", Reset);
    commands.register("users", Users);

    commands.register("addfeed", logged_in(AddFeed));
    commands.register("feeds", Feeds);
    commands.register("agg", Agg);

    commands.register("follow", logged_in(Follow));
    commands.register("following", logged_in(Following));
    commands.register("unfollow", logged_in(Unfollow));

    commands
}
