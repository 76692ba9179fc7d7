use crate::render::{render_completed_page, render_quiz_page, render_table_page};
use crate::vm::{CompletedVm, QuizPageVm, TableVm};

fn base_vm() -> QuizPageVm {
    QuizPageVm {
        prompt: "List students older than 21".to_string(),
        score: 1,
        position: 2,
        total: 3,
        submitted: String::new(),
        feedback: None,
        error: None,
        table: None,
    }
}

#[test]
fn quiz_page_renders_prompt_score_and_form() {
    let html = render_quiz_page(base_vm());
    assert!(html.starts_with("<!doctype html>"), "missing doctype in {html}");
    assert!(
        html.contains("Task 2/3: List students older than 21"),
        "missing prompt in {html}"
    );
    assert!(html.contains("Score: 1"), "missing score in {html}");
    assert!(html.contains("name=\"query\""), "missing textarea in {html}");
    assert!(html.contains("method=\"post\""), "missing form in {html}");
    assert!(!html.contains("class=\"feedback\""), "unexpected feedback in {html}");
    assert!(!html.contains("Results:"), "unexpected table in {html}");
}

#[test]
fn quiz_page_renders_feedback_and_results() {
    let vm = QuizPageVm {
        submitted: "SELECT ad FROM ogrenciler".to_string(),
        feedback: Some("Not the expected query yet. Try again.".to_string()),
        table: Some(TableVm {
            columns: vec!["ad".to_string()],
            rows: vec![vec!["Ali".to_string()], vec!["Ayse".to_string()]],
        }),
        ..base_vm()
    };
    let html = render_quiz_page(vm);
    assert!(html.contains("Try again."), "missing feedback in {html}");
    assert!(html.contains("<th>ad</th>"), "missing header in {html}");
    assert!(html.contains("<td>Ayse</td>"), "missing cell in {html}");
    assert!(
        html.contains("SELECT ad FROM ogrenciler"),
        "submitted text not echoed in {html}"
    );
}

#[test]
fn quiz_page_renders_error() {
    let vm = QuizPageVm {
        error: Some("Only SELECT queries are allowed.".to_string()),
        ..base_vm()
    };
    let html = render_quiz_page(vm);
    assert!(html.contains("class=\"error\""), "missing error in {html}");
    assert!(html.contains("Only SELECT queries are allowed."));
}

#[test]
fn quiz_page_escapes_submitted_markup() {
    let vm = QuizPageVm {
        submitted: "SELECT '<script>'".to_string(),
        ..base_vm()
    };
    let html = render_quiz_page(vm);
    assert!(!html.contains("<script>"), "unescaped markup in {html}");
}

#[test]
fn table_page_lists_every_row() {
    let table = TableVm {
        columns: vec!["id".into(), "ad".into()],
        rows: vec![
            vec!["1".into(), "Ali".into()],
            vec!["2".into(), "Ayse".into()],
        ],
    };
    let html = render_table_page(table);
    assert!(html.contains("2 rows"), "missing row count in {html}");
    assert!(html.contains("<td>Ali</td>"), "missing row in {html}");
}

#[test]
fn completed_page_handles_empty_and_filled_lists() {
    let html = render_completed_page(CompletedVm {
        items: Vec::new(),
        total: 3,
    });
    assert!(html.contains("No tasks completed yet."), "missing empty text in {html}");

    let html = render_completed_page(CompletedVm {
        items: vec!["List all students".into()],
        total: 3,
    });
    assert!(html.contains("Completed tasks (1/3)"), "missing count in {html}");
    assert!(html.contains("<li>List all students</li>"), "missing item in {html}");
}
