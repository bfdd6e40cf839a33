// SPDX-License-Identifier: MIT
//! Scenario state for the cucumber harness.

use async_trait::async_trait;
use cucumber::World;
use stepshot::{
    BrowserSession, Capability, CaptureConfig, CaptureCoordinator, CaptureError, Result,
};
use tempfile::TempDir;

/// In-memory stand-in for a real driver, switchable between the markup-only
/// and renderable capability variants.
#[derive(Debug)]
pub struct FakeBrowser {
    pub mode: Capability,
    pub body: Option<String>,
}

#[async_trait]
impl BrowserSession for FakeBrowser {
    fn capability(&self) -> Capability {
        self.mode
    }

    async fn markup(&self) -> Result<String> {
        self.body.clone().ok_or(CaptureError::NoPageLoaded)
    }

    async fn render_png(&self) -> Result<Vec<u8>> {
        // A minimal PNG signature is enough for filename/artifact checks.
        Ok(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
    }
}

/// One world per scenario: a fresh temp output directory, a coordinator
/// initialized over it, and a fake browser session.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct StepshotWorld {
    pub coordinator: CaptureCoordinator,
    pub session: FakeBrowser,
    // Keep the tempdir handle so artifacts are cleaned after the scenario.
    pub tmp: TempDir,
}

impl StepshotWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create scenario tempdir");
        let coordinator = CaptureCoordinator::initialize_suite(CaptureConfig {
            dir: tmp.path().to_path_buf(),
            fail: true,
            purge: false,
        })
        .expect("initialize coordinator");
        Self {
            coordinator,
            session: FakeBrowser {
                mode: Capability::MarkupOnly,
                body: None,
            },
            tmp,
        }
    }

    /// Reinitialize the coordinator over the same directory with a
    /// different failure-capture setting.
    pub fn reconfigure(&mut self, fail: bool) {
        self.coordinator = CaptureCoordinator::initialize_suite(CaptureConfig {
            dir: self.tmp.path().to_path_buf(),
            fail,
            purge: false,
        })
        .expect("reinitialize coordinator");
    }
}
