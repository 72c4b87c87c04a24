//! Tests for HistoryPipeline

use std::path::{Path, PathBuf};

use crate::hg::HgError;
use crate::hg::constants::PANEL_NAME;
use crate::model::{AdvancePolicy, PanelRegistry, Syntax, WriteMode};

use super::{
    HistoryPipeline, InputPrompt, PendingCommand, PipelineConfig, PipelineJob, PipelineState,
    PresentationSurface, PromptEvent, PromptId, SelectionKind,
};

const LOG: &str = "3|a1b2c3|default|Alice|2023-01-01|2 days ago|fix bug||2|d4e5f6|default|Bob|2022-12-30|4 days ago|add feature||";

const FILE: &str = "/repo/src/main.rs";

/// Surface that records every call
#[derive(Debug, Default)]
struct RecordingSurface {
    lists: Vec<Vec<String>>,
    shown_panels: Vec<String>,
    prompts: Vec<InputPrompt>,
}

impl PresentationSurface for RecordingSurface {
    fn show_selection_list(&mut self, items: Vec<String>) {
        self.lists.push(items);
    }

    fn show_panel(&mut self, name: &str) {
        self.shown_panels.push(name.to_string());
    }

    fn show_input_prompt(&mut self, prompt: InputPrompt) {
        self.prompts.push(prompt);
    }
}

fn pipeline_with(config: PipelineConfig) -> (HistoryPipeline, PanelRegistry) {
    let panels = PanelRegistry::new();
    (HistoryPipeline::new(config, panels.clone()), panels)
}

fn pipeline() -> (HistoryPipeline, PanelRegistry) {
    pipeline_with(PipelineConfig::default())
}

fn stderr_failure(command: &str) -> HgError {
    HgError::ProcessFailure {
        command: command.to_string(),
        stderr: "abort: something went wrong\n".to_string(),
    }
}

/// Run the log step and land in the selection list
fn to_selection(pipeline: &mut HistoryPipeline, surface: &mut RecordingSurface) {
    pipeline.begin_history(Some(Path::new(FILE))).unwrap();
    let next = pipeline
        .on_command_finished(PipelineJob::Log, Ok(LOG.to_string()), surface)
        .unwrap();
    assert!(next.is_none());
}

fn panel_text(panels: &PanelRegistry) -> Option<String> {
    panels.get(PANEL_NAME).map(|p| p.text())
}

#[test]
fn test_starts_idle() {
    let (pipeline, _) = pipeline();
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(pipeline.navigator().is_empty());
    assert!(pipeline.file().is_none());
}

#[test]
fn test_unsaved_file_aborts() {
    let (mut pipeline, _) = pipeline();
    let err = pipeline.begin_history(None).unwrap_err();
    assert!(matches!(err, HgError::UnsavedFile));
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[test]
fn test_begin_builds_log_command_in_file_dir() {
    let (mut pipeline, _) = pipeline();
    let pending = pipeline.begin_history(Some(Path::new(FILE))).unwrap();

    assert_eq!(pending.job, PipelineJob::Log);
    assert!(
        pending
            .request
            .command_line
            .starts_with("hg log --limit 30 --template ")
    );
    assert!(pending.request.command_line.ends_with(" /repo/src/main.rs"));
    assert_eq!(pending.request.working_dir, PathBuf::from("/repo/src"));
    assert_eq!(pipeline.state(), PipelineState::LogFetching);
    assert_eq!(pipeline.file(), Some(Path::new(FILE)));
}

#[test]
fn test_bare_file_name_runs_in_current_dir() {
    let (mut pipeline, _) = pipeline();
    let pending = pipeline.begin_history(Some(Path::new("main.rs"))).unwrap();
    assert_eq!(pending.request.working_dir, PathBuf::from("."));
}

#[test]
fn test_custom_limit() {
    let (mut pipeline, _) = pipeline_with(PipelineConfig {
        limit: 5,
        ..PipelineConfig::default()
    });
    let pending = pipeline.begin_history(Some(Path::new(FILE))).unwrap();
    assert!(pending.request.command_line.contains("--limit 5 "));
}

#[test]
fn test_log_output_shows_summaries() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);

    assert_eq!(
        pipeline.state(),
        PipelineState::AwaitingSelection(SelectionKind::List)
    );
    assert_eq!(pipeline.navigator().len(), 2);
    assert_eq!(
        surface.lists,
        vec![vec![
            "Alice 2 days ago: fix bug".to_string(),
            "Bob 4 days ago: add feature".to_string(),
        ]]
    );
}

#[test]
fn test_end_to_end_select_first_fetches_its_diff() {
    let (mut pipeline, panels) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);

    let PendingCommand { job, request } = pipeline.on_selection(Some(0)).unwrap().unwrap();
    assert_eq!(job, PipelineJob::Diff);
    assert_eq!(request.command_line, "hg log -p -r 3:a1b2c3");
    assert_eq!(request.working_dir, PathBuf::from("/repo/src"));
    assert_eq!(pipeline.state(), PipelineState::DiffFetching);

    let patch = "diff -r 000000000000 -r a1b2c3 src/main.rs\n+fixed\n";
    pipeline
        .on_command_finished(PipelineJob::Diff, Ok(patch.to_string()), &mut surface)
        .unwrap();

    let panel = panels.get(PANEL_NAME).unwrap().snapshot();
    assert_eq!(panel.syntax(), Syntax::Diff);
    insta::assert_snapshot!(panel.text().trim_end(), @r"
    3:a1b2c3 [Alice 2023-01-01]
     - fix bug
    diff -r 000000000000 -r a1b2c3 src/main.rs
    +fixed
    ");
    assert_eq!(surface.shown_panels, vec![PANEL_NAME.to_string()]);

    // Cursor moved on to the older changeset
    assert_eq!(pipeline.navigator().current_index(), Some(1));
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[test]
fn test_cancel_selection_returns_to_idle() {
    let (mut pipeline, panels) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);

    assert!(pipeline.on_selection(None).unwrap().is_none());
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(panel_text(&panels).is_none());
}

#[test]
fn test_log_failure_does_not_load_or_touch_panel() {
    let (mut pipeline, panels) = pipeline();
    let mut surface = RecordingSurface::default();
    pipeline.begin_history(Some(Path::new(FILE))).unwrap();

    let err = pipeline
        .on_command_finished(PipelineJob::Log, Err(stderr_failure("hg log")), &mut surface)
        .unwrap_err();

    assert!(matches!(err, HgError::ProcessFailure { .. }));
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(pipeline.navigator().is_empty());
    assert!(surface.lists.is_empty());
    assert!(panel_text(&panels).is_none());
}

#[test]
fn test_log_failure_keeps_previous_panel_content() {
    let (mut pipeline, panels) = pipeline();
    panels.create_if_absent(PANEL_NAME).append("earlier output", 0);
    let mut surface = RecordingSurface::default();

    pipeline.begin_history(Some(Path::new(FILE))).unwrap();
    let _ = pipeline.on_command_finished(
        PipelineJob::Log,
        Err(stderr_failure("hg log")),
        &mut surface,
    );

    assert_eq!(panel_text(&panels).as_deref(), Some("earlier output"));
}

#[test]
fn test_diff_failure_does_not_touch_panel_or_cursor() {
    let (mut pipeline, panels) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(1)).unwrap();

    let err = pipeline
        .on_command_finished(
            PipelineJob::Diff,
            Err(stderr_failure("hg log -p")),
            &mut surface,
        )
        .unwrap_err();

    assert!(matches!(err, HgError::ProcessFailure { .. }));
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(panel_text(&panels).is_none());
    assert!(surface.shown_panels.is_empty());
    assert_eq!(pipeline.navigator().current_index(), Some(1));
}

#[test]
fn test_malformed_log_aborts() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    pipeline.begin_history(Some(Path::new(FILE))).unwrap();

    let err = pipeline
        .on_command_finished(
            PipelineJob::Log,
            Ok("3|a1b2c3|default||".to_string()),
            &mut surface,
        )
        .unwrap_err();

    assert!(matches!(err, HgError::MalformedRecord { .. }));
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(surface.lists.is_empty());
}

#[test]
fn test_empty_log_shows_empty_list() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    pipeline.begin_history(Some(Path::new(FILE))).unwrap();
    pipeline
        .on_command_finished(PipelineJob::Log, Ok(String::new()), &mut surface)
        .unwrap();

    assert_eq!(surface.lists, vec![Vec::<String>::new()]);
    assert!(pipeline.navigator().is_empty());
}

#[test]
fn test_out_of_range_selection_is_an_error() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);

    let err = pipeline.on_selection(Some(7)).unwrap_err();
    assert!(matches!(err, HgError::Navigator(_)));
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[test]
fn test_stale_completion_is_ignored() {
    let (mut pipeline, panels) = pipeline();
    let mut surface = RecordingSurface::default();

    // Diff output while idle
    let next = pipeline
        .on_command_finished(PipelineJob::Diff, Ok("patch".to_string()), &mut surface)
        .unwrap();
    assert!(next.is_none());
    assert!(panel_text(&panels).is_none());

    // Log output arriving after the run was reset
    pipeline.begin_history(Some(Path::new(FILE))).unwrap();
    pipeline.reset();
    pipeline
        .on_command_finished(PipelineJob::Log, Ok(LOG.to_string()), &mut surface)
        .unwrap();
    assert!(surface.lists.is_empty());
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[test]
fn test_selection_outside_list_prompt_is_ignored() {
    let (mut pipeline, _) = pipeline();
    assert!(pipeline.on_selection(Some(0)).unwrap().is_none());
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[test]
fn test_new_history_resets_navigator_selection() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(1)).unwrap();

    to_selection(&mut pipeline, &mut surface);
    assert_eq!(pipeline.navigator().current_index(), None);
}

fn prompting(policy: AdvancePolicy) -> (HistoryPipeline, PanelRegistry) {
    pipeline_with(PipelineConfig {
        prompt_for_next: true,
        advance_policy: policy,
        ..PipelineConfig::default()
    })
}

#[test]
fn test_prompt_for_next_offers_older_changeset() {
    let (mut pipeline, _) = prompting(AdvancePolicy::Clamp);
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(0)).unwrap();
    pipeline
        .on_command_finished(PipelineJob::Diff, Ok("p".to_string()), &mut surface)
        .unwrap();

    assert_eq!(
        pipeline.state(),
        PipelineState::AwaitingSelection(SelectionKind::NextChangeset)
    );
    assert_eq!(surface.prompts.len(), 1);
    assert_eq!(surface.prompts[0].id, PromptId::NextChangeset);
    assert_eq!(
        surface.prompts[0].label,
        "Search next changeset? (Bob 4 days ago: add feature)"
    );

    // Typing does nothing
    assert!(
        pipeline
            .on_next_prompt(PromptEvent::Changed("x".to_string()))
            .unwrap()
            .is_none()
    );

    let pending = pipeline
        .on_next_prompt(PromptEvent::Submitted(String::new()))
        .unwrap()
        .unwrap();
    assert_eq!(pending.request.command_line, "hg log -p -r 2:d4e5f6");
    assert_eq!(pipeline.state(), PipelineState::DiffFetching);
}

#[test]
fn test_prompt_for_next_cancel_goes_idle() {
    let (mut pipeline, _) = prompting(AdvancePolicy::Clamp);
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(0)).unwrap();
    pipeline
        .on_command_finished(PipelineJob::Diff, Ok("p".to_string()), &mut surface)
        .unwrap();

    assert!(
        pipeline
            .on_next_prompt(PromptEvent::Cancelled)
            .unwrap()
            .is_none()
    );
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[test]
fn test_no_prompt_after_last_changeset_when_clamped() {
    let (mut pipeline, _) = prompting(AdvancePolicy::Clamp);
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(1)).unwrap();
    pipeline
        .on_command_finished(PipelineJob::Diff, Ok("p".to_string()), &mut surface)
        .unwrap();

    assert!(surface.prompts.is_empty());
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert_eq!(pipeline.navigator().current_index(), Some(1));
}

#[test]
fn test_wrap_policy_prompts_for_newest() {
    let (mut pipeline, _) = prompting(AdvancePolicy::Wrap);
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(1)).unwrap();
    pipeline
        .on_command_finished(PipelineJob::Diff, Ok("p".to_string()), &mut surface)
        .unwrap();

    assert_eq!(
        surface.prompts[0].label,
        "Search next changeset? (Alice 2 days ago: fix bug)"
    );
}

#[test]
fn test_stop_policy_exhausts_without_prompt() {
    let (mut pipeline, _) = prompting(AdvancePolicy::Stop);
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(1)).unwrap();
    pipeline
        .on_command_finished(PipelineJob::Diff, Ok("p".to_string()), &mut surface)
        .unwrap();

    assert!(surface.prompts.is_empty());
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(pipeline.navigator().current().is_err());
}

#[test]
fn test_append_mode_keeps_previous_diff() {
    let (mut pipeline, panels) = pipeline_with(PipelineConfig {
        write_mode: WriteMode::Append,
        ..PipelineConfig::default()
    });
    let mut surface = RecordingSurface::default();

    for index in 0..2 {
        to_selection(&mut pipeline, &mut surface);
        pipeline.on_selection(Some(index)).unwrap();
        pipeline
            .on_command_finished(PipelineJob::Diff, Ok(format!("patch {index}\n")), &mut surface)
            .unwrap();
    }

    let text = panel_text(&panels).unwrap();
    assert!(text.contains("patch 0"));
    assert!(text.contains("patch 1"));
    assert!(text.find("fix bug") < text.find("add feature"));
}

#[test]
fn test_replace_mode_overwrites_previous_diff() {
    let (mut pipeline, panels) = pipeline();
    let mut surface = RecordingSurface::default();

    for index in 0..2 {
        to_selection(&mut pipeline, &mut surface);
        pipeline.on_selection(Some(index)).unwrap();
        pipeline
            .on_command_finished(PipelineJob::Diff, Ok(format!("patch {index}\n")), &mut surface)
            .unwrap();
    }

    let text = panel_text(&panels).unwrap();
    assert!(!text.contains("patch 0"));
    assert!(text.contains("patch 1"));
}

#[test]
fn test_stderr_policy_and_timeout_flow_into_requests() {
    use crate::hg::StderrPolicy;
    use std::time::Duration;

    let (mut pipeline, _) = pipeline_with(PipelineConfig {
        stderr_policy: StderrPolicy::ExitStatusOnly,
        timeout: Some(Duration::from_secs(9)),
        ..PipelineConfig::default()
    });
    let pending = pipeline.begin_history(Some(Path::new(FILE))).unwrap();
    assert_eq!(pending.request.stderr_policy, StderrPolicy::ExitStatusOnly);
    assert_eq!(pending.request.timeout, Some(Duration::from_secs(9)));
}

#[test]
fn test_reopen_list_after_diff() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(0)).unwrap();
    pipeline
        .on_command_finished(PipelineJob::Diff, Ok("p".to_string()), &mut surface)
        .unwrap();

    assert!(pipeline.reopen_list(&mut surface));
    assert_eq!(surface.lists.len(), 2);
    assert_eq!(surface.lists[0], surface.lists[1]);
    assert_eq!(
        pipeline.state(),
        PipelineState::AwaitingSelection(SelectionKind::List)
    );

    let pending = pipeline.on_selection(Some(1)).unwrap().unwrap();
    assert_eq!(pending.request.command_line, "hg log -p -r 2:d4e5f6");
}

#[test]
fn test_reopen_list_needs_a_parsed_log() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    assert!(!pipeline.reopen_list(&mut surface));

    // Previous file's changesets are not offered for a failed run
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(None).unwrap();
    pipeline.begin_history(Some(Path::new("/other/b.rs"))).unwrap();
    let _ = pipeline.on_command_finished(
        PipelineJob::Log,
        Err(stderr_failure("hg log")),
        &mut surface,
    );
    assert!(!pipeline.reopen_list(&mut surface));
    assert_eq!(surface.lists.len(), 1);
}

#[test]
fn test_reopen_list_not_while_fetching() {
    let (mut pipeline, _) = pipeline();
    let mut surface = RecordingSurface::default();
    to_selection(&mut pipeline, &mut surface);
    pipeline.on_selection(Some(0)).unwrap();
    assert!(!pipeline.reopen_list(&mut surface));
    assert_eq!(pipeline.state(), PipelineState::DiffFetching);
}
