// SPDX-License-Identifier: MIT
//! Step definitions binding the Gherkin vocabulary to the coordinator.

use crate::bdd::world::StepshotWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use std::fs;
use stepshot::{Capability, StepContext};

const FEATURE_FILE: &str = "screenshot.feature";

fn record_step(world: &mut StepshotWorld, step: &Step) {
    world.coordinator.before_step(StepContext {
        feature_file: FEATURE_FILE.to_string(),
        line: step.position.line as u32,
    });
}

#[given("I am on the screenshot test page")]
async fn on_test_page(world: &mut StepshotWorld) {
    world.session.body = Some(
        "<html><head><title>Test page</title></head><body>stepshot</body></html>".to_string(),
    );
}

#[given("the browser can render screenshots")]
async fn renderable_browser(world: &mut StepshotWorld) {
    world.session.mode = Capability::Renderable;
}

#[given("screenshot on failure is disabled")]
async fn disable_on_failure(world: &mut StepshotWorld) {
    world.reconfigure(false);
}

#[when("I save screenshot")]
async fn save_screenshot(world: &mut StepshotWorld, step: &Step) {
    record_step(world, step);
    world
        .coordinator
        .save_screenshot(&world.session)
        .await
        .expect("explicit save screenshot fails loudly");
}

#[when("a step fails")]
async fn a_step_fails(world: &mut StepshotWorld, step: &Step) {
    record_step(world, step);
    world.coordinator.after_step(&world.session, false).await;
}

#[when("I remove all files from screenshot directory")]
async fn remove_all(world: &mut StepshotWorld) {
    world.coordinator.purge().expect("purge screenshot directory");
}

#[then(regex = r#"^file wildcard "([^"]*)" should exist$"#)]
async fn file_wildcard_exists(world: &mut StepshotWorld, wildcard: String) {
    world
        .coordinator
        .assert_file_matching(&wildcard)
        .unwrap_or_else(|e| panic!("{e}"));
}

#[then(regex = r"^the screenshot directory has (\d+) files$")]
async fn directory_has_files(world: &mut StepshotWorld, expected: usize) {
    let count = fs::read_dir(world.tmp.path())
        .map(|it| {
            it.filter(|e| e.as_ref().map(|e| e.path().is_file()).unwrap_or(false))
                .count()
        })
        .unwrap_or(0);
    assert_eq!(count, expected, "unexpected artifact count");
}
