use sq_controls::{Error, FaultPolicy, Page};

const INPUT: &str = "input.sq-input";
const DELETE: &str = "button.btn.sq-delete-button";

fn row_page() -> sq_controls::Result<Page> {
    Page::from_html(
        r#"
        <form id="alerts">
          <div id="events"></div>
          <button type="button" class="btn sq-add-button" id="add-event">Add event</button>
        </form>
        "#,
    )
}

#[test]
fn add_then_delete_scenario_keeps_pairs_in_order() -> sq_controls::Result<()> {
    let mut page = row_page()?;
    assert!(page.child_labels("#events")?.is_empty());

    page.click("#add-event")?;
    assert_eq!(page.child_labels("#events")?, vec![INPUT, DELETE]);

    page.click("#add-event")?;
    assert_eq!(page.child_labels("#events")?, vec![INPUT, DELETE, INPUT, DELETE]);

    page.type_text("#events > .sq-input", "Tornado Warning")?;
    page.click("#events > .sq-input + .sq-delete-button + .sq-input + .sq-delete-button")?;
    assert_eq!(page.child_labels("#events")?, vec![INPUT, DELETE]);
    page.assert_value("#events > .sq-input", "Tornado Warning")?;
    Ok(())
}

#[test]
fn deleting_the_first_row_leaves_later_rows_untouched() -> sq_controls::Result<()> {
    let mut page = row_page()?;
    page.click("#add-event")?;
    page.click("#add-event")?;
    page.click("#add-event")?;
    page.type_text("#events > .sq-delete-button + .sq-input", "Flood Watch")?;

    page.click("#events > .sq-delete-button")?;

    assert_eq!(page.child_labels("#events")?, vec![INPUT, DELETE, INPUT, DELETE]);
    page.assert_value("#events > .sq-input", "Flood Watch")?;
    Ok(())
}

#[test]
fn generated_delete_button_is_a_plain_button() -> sq_controls::Result<()> {
    let mut page = row_page()?;
    page.click("#add-event")?;

    page.assert_text("#events > .sq-delete-button", "Delete")?;
    assert_eq!(
        page.attribute("#events > .sq-delete-button", "type")?,
        Some("button".to_string())
    );
    assert_eq!(
        page.attribute("#events > .sq-delete-button", "value")?,
        Some("delete".to_string())
    );
    assert_eq!(page.attribute("#events > .sq-input", "name")?, None);
    Ok(())
}

#[test]
fn delete_after_non_input_removes_only_the_button() -> sq_controls::Result<()> {
    let mut page = Page::from_html(
        r#"
        <div id="c">
          <input class="sq-input" id="orphan">
          <p class="hint">separator</p>
          <button class="btn sq-delete-button" id="d">Delete</button>
        </div>
        "#,
    )?;

    page.click("#d")?;

    assert_eq!(page.child_labels("#c")?, vec!["input#orphan.sq-input", "p.hint"]);
    Ok(())
}

#[test]
fn delete_without_any_sibling_removes_the_button() -> sq_controls::Result<()> {
    let mut page = Page::from_html(
        r#"<div id="c"><button class="sq-delete-button" id="d">Delete</button></div>"#,
    )?;
    page.click("#d")?;
    assert!(page.child_labels("#c")?.is_empty());
    Ok(())
}

#[test]
fn strict_policy_reports_broken_pairing_after_removing_button() -> sq_controls::Result<()> {
    let mut page = Page::builder().fault_policy(FaultPolicy::Strict).build(
        r#"<div id="c"><span id="s">x</span><button class="sq-delete-button" id="d">Delete</button></div>"#,
    )?;

    let err = page.click("#d").expect_err("pairing is broken");
    assert_eq!(
        err,
        Error::BrokenPairing {
            button: "button#d.sq-delete-button".to_string(),
            previous: Some("span#s".to_string()),
        }
    );
    assert_eq!(page.child_labels("#c")?, vec!["span#s"]);
    Ok(())
}

#[test]
fn add_without_container_is_ignored_with_a_diagnostic() -> sq_controls::Result<()> {
    let mut page = Page::builder()
        .trace(true)
        .trace_stderr(false)
        .build(r#"<button class="sq-add-button" id="add">Add</button><div id="after"></div>"#)?;
    page.take_trace_logs();

    page.click("#add")?;

    page.assert_count(".sq-input", 0)?;
    let logs = page.take_trace_logs();
    assert!(
        logs.iter().any(|line| line
            == "[row] ignored: add button button#add.sq-add-button has no preceding container"),
        "logs: {logs:?}"
    );
    Ok(())
}

#[test]
fn add_without_container_fails_in_strict_mode() -> sq_controls::Result<()> {
    let mut page = Page::builder()
        .fault_policy(FaultPolicy::Strict)
        .build(r#"<input id="q"><button class="sq-add-button" id="add">Add</button>"#)?;

    let err = page.click("#add").expect_err("void element cannot hold rows");
    assert_eq!(
        err,
        Error::MissingContainer {
            button: "button#add.sq-add-button".to_string()
        }
    );
    page.assert_count(".sq-delete-button", 0)?;
    Ok(())
}

#[test]
fn container_is_found_across_whitespace_and_text() -> sq_controls::Result<()> {
    let mut page = Page::from_html(
        "<ul id=\"zones\"></ul>\n  some label text\n  <button class=\"sq-add-button\" id=\"add\">+</button>",
    )?;
    page.click("#add")?;
    assert_eq!(page.child_labels("#zones")?, vec![INPUT, DELETE]);
    Ok(())
}

#[test]
fn clicks_on_descendants_of_add_button_are_not_delegated() -> sq_controls::Result<()> {
    let mut page = Page::from_html(
        r#"<div id="c"></div><button class="sq-add-button"><span id="icon">+</span></button>"#,
    )?;
    page.click("#icon")?;
    page.assert_count("#c > *", 0)?;
    Ok(())
}

#[test]
fn disabled_add_button_does_nothing() -> sq_controls::Result<()> {
    let mut page = Page::from_html(
        r#"<div id="c"></div><button class="sq-add-button" id="add" disabled>Add</button>"#,
    )?;
    page.click("#add")?;
    page.assert_count("#c > *", 0)?;
    Ok(())
}

#[test]
fn container_data_name_names_new_inputs() -> sq_controls::Result<()> {
    let mut page = Page::from_html(
        r#"
        <form id="f">
          <div id="zones" data-name="zone"></div>
          <button type="button" class="sq-add-button" id="add-zone">Add zone</button>
        </form>
        "#,
    )?;
    page.click("#add-zone")?;
    page.click("#add-zone")?;
    page.type_text("#zones > .sq-input", "KSZ001")?;
    page.type_text("#zones > .sq-delete-button + .sq-input", "KSZ002")?;

    let values = page.form_values("#f")?;
    assert_eq!(values.get_all("zone"), vec!["KSZ001", "KSZ002"]);
    Ok(())
}

#[test]
fn each_add_button_fills_its_own_container() -> sq_controls::Result<()> {
    let mut page = Page::from_html(
        r#"
        <div id="events"></div><button class="sq-add-button" id="add-event">+</button>
        <div id="codes"></div><button class="sq-add-button" id="add-code">+</button>
        "#,
    )?;
    page.click("#add-code")?;
    page.click("#add-code")?;
    page.click("#add-event")?;

    page.assert_count("#events > .sq-input", 1)?;
    page.assert_count("#codes > .sq-input", 2)?;

    page.click("#codes > .sq-delete-button")?;
    page.assert_count("#codes > .sq-input", 1)?;
    page.assert_count("#events > .sq-input", 1)?;
    Ok(())
}

#[test]
fn trace_records_delegated_dispatch() -> sq_controls::Result<()> {
    let mut page = Page::from_html(r#"<div id="c"></div><button class="sq-add-button">+</button>"#)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);

    page.click(".sq-add-button")?;

    assert_eq!(
        page.take_trace_logs(),
        vec![
            "[event] click target=button.sq-add-button current=document action=AddRow".to_string(),
            "[row] appended row to div#c".to_string(),
            "[event] done click target=button.sq-add-button outcome=completed".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn type_text_rejects_non_inputs() -> sq_controls::Result<()> {
    let mut page = row_page()?;
    match page.type_text("#events", "x") {
        Err(Error::TypeMismatch { actual, .. }) => assert_eq!(actual, "div"),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn unknown_selector_is_reported() -> sq_controls::Result<()> {
    let mut page = row_page()?;
    assert_eq!(
        page.click("#missing"),
        Err(Error::SelectorNotFound("#missing".to_string()))
    );
    Ok(())
}
