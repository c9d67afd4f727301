use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};
use sq_controls::Page;

const ROW_PROPTEST_REGRESSION_FILE: &str = "tests/proptest-regressions/row_property_fuzz_test.txt";
const DEFAULT_ROW_PROPTEST_CASES: u32 = 128;

const INPUT: &str = "input.sq-input";
const DELETE: &str = "button.btn.sq-delete-button";

const ROWS_FORM_HTML: &str = r#"
<form id="f">
  <div id="rows" data-name="row"></div>
  <button type="button" class="btn sq-add-button" id="add">Add</button>
  <button type="button" class="btn sq-button" id="leave" data-url="/elsewhere">Leave</button>
</form>
"#;

#[derive(Clone, Debug)]
enum RowAction {
    Add,
    Type(usize, String),
    Delete(usize),
}

fn row_proptest_cases() -> u32 {
    std::env::var("SQ_CONTROLS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_ROW_PROPTEST_CASES)
}

fn text_input_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('k'),
            Just('z'),
            Just('0'),
            Just('9'),
            Just(' '),
            Just('-'),
            Just('<'),
            Just('&'),
        ],
        0..=8,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn row_action_strategy() -> BoxedStrategy<RowAction> {
    prop_oneof![
        4 => Just(RowAction::Add),
        3 => (0usize..8, text_input_strategy()).prop_map(|(row, text)| RowAction::Type(row, text)),
        3 => (0usize..8).prop_map(RowAction::Delete),
    ]
    .boxed()
}

fn row_action_sequence_strategy() -> BoxedStrategy<Vec<RowAction>> {
    vec(row_action_strategy(), 1..=32).boxed()
}

/// Selector for the `row`-th input (or its delete button) inside `#rows`.
fn row_selector(row: usize, delete: bool) -> String {
    let mut selector = "#rows > .sq-input".to_string();
    for _ in 0..row {
        selector.push_str(" + .sq-delete-button + .sq-input");
    }
    if delete {
        selector.push_str(" + .sq-delete-button");
    }
    selector
}

fn fail(err: sq_controls::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn apply(page: &mut Page, model: &mut Vec<String>, action: &RowAction) -> sq_controls::Result<()> {
    match action {
        RowAction::Add => {
            page.click("#add")?;
            model.push(String::new());
        }
        RowAction::Type(row, text) => {
            if model.is_empty() {
                return Ok(());
            }
            let row = row % model.len();
            page.type_text(&row_selector(row, false), text)?;
            model[row] = text.clone();
        }
        RowAction::Delete(row) => {
            if model.is_empty() {
                return Ok(());
            }
            let row = row % model.len();
            page.click(&row_selector(row, true))?;
            model.remove(row);
        }
    }
    Ok(())
}

fn assert_rows_match_model(actions: &[RowAction]) -> TestCaseResult {
    let mut page = Page::from_html(ROWS_FORM_HTML).map_err(fail)?;
    let mut model: Vec<String> = Vec::new();

    for (step, action) in actions.iter().enumerate() {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            apply(&mut page, &mut model, action)
        }));
        match outcome {
            Err(_) => {
                prop_assert!(
                    false,
                    "action panicked at step {step}: {action:?}, actions={actions:?}"
                );
            }
            Ok(Err(error)) => {
                prop_assert!(
                    false,
                    "action returned error at step {step}: {action:?}, error={error:?}, actions={actions:?}"
                );
            }
            Ok(Ok(())) => {}
        }

        let labels = page.child_labels("#rows").map_err(fail)?;
        let expected: Vec<&str> = model.iter().flat_map(|_| [INPUT, DELETE]).collect();
        prop_assert_eq!(labels, expected, "row layout after step {}: {:?}", step, action);

        let values = page.form_values("#f").map_err(fail)?;
        let expected: Vec<&str> = model.iter().map(String::as_str).collect();
        prop_assert_eq!(values.get_all("row"), expected, "row values after step {}", step);

        prop_assert!(page.take_location_navigations().is_empty());
        prop_assert_eq!(page.listener_count(), 3);
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: row_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(ROW_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn add_type_and_delete_sequences_keep_rows_paired(actions in row_action_sequence_strategy()) {
        assert_rows_match_model(&actions)?;
    }
}
