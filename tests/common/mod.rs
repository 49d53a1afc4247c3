#![allow(dead_code)]

use pick_bot::{Document, DocumentTree, DomSnapshot, ElementId, ListenerRegistry, Picker};

/// `body > div#app > ul > li.row x3 > span`: the picking surface is the `ul`.
pub fn rows_page() -> Document {
    let row = || DomSnapshot::new("li").attr("class", "row").child(DomSnapshot::new("span"));
    let snapshot = DomSnapshot::new("body").child(
        DomSnapshot::new("div")
            .attr("id", "app")
            .child(DomSnapshot::new("ul").children([row(), row(), row()])),
    );
    Document::from_snapshot(&snapshot)
}

/// A to-do page. Each task row holds a label, a text input and a delete
/// button; an "add" button sits outside the list.
///
/// ```text
/// /                body
/// /0               div#app
/// /0/0             main            <- picking surface
/// /0/0/0           h1
/// /0/0/1           ul.tasks
/// /0/0/1/{i}       li.task
/// /0/0/1/{i}/0     span
/// /0/0/1/{i}/1     input
/// /0/0/1/{i}/2     button.delete
/// /0/0/2           button#add
/// ```
pub fn todo_page() -> Document {
    let task = |title: &str| {
        DomSnapshot::new("li")
            .attr("class", "task")
            .child(DomSnapshot::new("span").value(title).inert())
            .child(DomSnapshot::new("input").attr("type", "text"))
            .child(DomSnapshot::new("button").attr("class", "delete"))
    };
    let snapshot = DomSnapshot::new("body").child(
        DomSnapshot::new("div").attr("id", "app").child(
            DomSnapshot::new("main")
                .child(DomSnapshot::new("h1"))
                .child(
                    DomSnapshot::new("ul")
                        .attr("class", "tasks")
                        .children([task("task 1"), task("task 2"), task("task 3")]),
                )
                .child(DomSnapshot::new("button").attr("id", "add")),
        ),
    );
    Document::from_snapshot(&snapshot)
}

/// Resolve a path locator like `/0/0/1`, panicking on typos.
pub fn el(doc: &Document, path: &str) -> ElementId {
    doc.resolve(&path.parse().unwrap())
        .unwrap_or_else(|| panic!("no element at {}", path))
}

pub fn row(i: usize) -> String {
    format!("/0/0/{}", i)
}

pub fn task(i: usize) -> String {
    format!("/0/0/1/{}", i)
}

pub fn task_input(i: usize) -> String {
    format!("/0/0/1/{}/1", i)
}

pub fn task_button(i: usize) -> String {
    format!("/0/0/1/{}/2", i)
}

pub fn picker(doc: Document) -> Picker<Document, ListenerRegistry> {
    Picker::new(doc, ListenerRegistry::new())
}

/// Picker on the to-do page with the three task rows locked as loop targets.
pub fn locked_todo_picker() -> Picker<Document, ListenerRegistry> {
    let mut p = picker(todo_page());
    p.start_picking().unwrap();
    let first = el(p.tree(), &task(0));
    p.hover(first).unwrap();
    p.click(first);
    p.lock_loop_step(pick_bot::Step::LoopLocked).unwrap();
    p
}

/// Record delete buttons as click targets and inputs as input targets.
pub fn recorded_todo_picker() -> Picker<Document, ListenerRegistry> {
    let mut p = locked_todo_picker();

    p.choose_click_action();
    let button = el(p.tree(), &task_button(0));
    p.hover(button).unwrap();
    p.click(button);
    p.save_action();

    p.choose_input_action();
    let input = el(p.tree(), &task_input(1));
    p.hover(input).unwrap();
    p.click(input);
    p.save_action();
    p.save_action();
    p
}

pub fn tags(doc: &Document, els: &[ElementId]) -> Vec<String> {
    els.iter()
        .map(|e| doc.tag_name(*e).unwrap_or("?").to_string())
        .collect()
}
