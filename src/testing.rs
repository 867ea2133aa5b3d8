//! Fixtures shared by handler tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{AppState, GatorError, Result};
use crate::cli::commands;
use crate::cli::registry::Command;
use crate::fetcher::Fetcher;

/// An output sink that can be read back after a handler ran.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serves one fixed body, or times out, and records every URL asked for.
pub struct ScriptedFetcher {
    body: Option<Vec<u8>>,
    pub requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn serving(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: Some(body.as_bytes().to_vec()),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn timing_out() -> Arc<Self> {
        Arc::new(Self {
            body: None,
            requested: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.body
            .clone()
            .ok_or_else(|| GatorError::Timeout(url.to_string()))
    }
}

/// In-memory state whose output is captured.
pub fn test_state() -> (AppState, SharedBuf) {
    let out = SharedBuf::default();
    let state = AppState::in_memory()
        .unwrap()
        .with_output(out.clone());
    (state, out)
}

/// Dispatch one command line through the full registry.
pub async fn run(state: &mut AppState, line: &[&str]) -> Result<()> {
    let (name, args) = line.split_first().expect("empty command line");
    let cmd = Command::new(*name, args.iter().map(|a| a.to_string()).collect());
    commands::default_registry().run(state, &cmd).await
}
