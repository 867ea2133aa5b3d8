use std::io::Write;

use async_trait::async_trait;

use crate::app::{AppState, GatorError, Result};
use crate::cli::registry::{Command, Handler};
use crate::domain::User;

pub struct Register;

#[async_trait]
impl Handler for Register {
    async fn run(&self, state: &mut AppState, cmd: &Command) -> Result<()> {
        let Some(name) = cmd.arg(0) else {
            writeln!(state.out, "Usage: {} <name>", cmd.name)?;
            return Ok(());
        };

        if !User::is_valid_name(name) {
            return Err(GatorError::InvalidUsername(name.to_string()));
        }

        if state.store.get_user_id_by_name(name)?.is_some() {
            return Err(GatorError::UserExists(name.to_string()));
        }

        let user = state
            .store
            .create_user(name)
            .map_err(|e| GatorError::CreateFailed(Box::new(e)))?;
        tracing::info!(user = %user.name, id = user.id, "user registered");

        state.session.log_in(&user.name);
        state.persist_session()?;

        writeln!(state.out, "User {} added successfully", user.name)?;
        Ok(())
    }
}

pub struct Login;

#[async_trait]
impl Handler for Login {
    async fn run(&self, state: &mut AppState, cmd: &Command) -> Result<()> {
        let Some(name) = cmd.arg(0) else {
            writeln!(state.out, "Usage: {} <name>", cmd.name)?;
            return Ok(());
        };

        let user = state
            .store
            .get_user(name)?
            .ok_or_else(|| GatorError::UserNotFound(name.to_string()))?;

        state.session.log_in(&user.name);
        state.persist_session()?;
        tracing::info!(user = %user.name, "logged in");

        writeln!(state.out, "Logged in as {}", user.name)?;
        Ok(())
    }
}

pub struct Reset;

#[async_trait]
impl Handler for Reset {
    async fn run(&self, state: &mut AppState, _cmd: &Command) -> Result<()> {
        let deleted = state
            .store
            .delete_users()
            .map_err(|e| GatorError::ResetFailed(Box::new(e)))?;
        tracing::info!(deleted, "users reset");

        state.session.clear();
        state.persist_session()?;

        writeln!(state.out, "Users reset successfully")?;
        Ok(())
    }
}

pub struct Users;

#[async_trait]
impl Handler for Users {
    async fn run(&self, state: &mut AppState, _cmd: &Command) -> Result<()> {
        let users = state
            .store
            .get_users()
            .map_err(|e| GatorError::ListFailed(Box::new(e)))?;

        let current = state.session.current_user_name().map(String::from);
        for user in users {
            if current.as_deref() == Some(user.name.as_str()) {
                writeln!(state.out, "{} (current)", user.name)?;
            } else {
                writeln!(state.out, "{}", user.name)?;
            }
        }

        Ok(())
    }
}
