//! Whole-frame scenarios driven through `Canvas::update`.

use std::cell::Cell;
use std::rc::Rc;

use trellis_core::{
    Color, DrawCmd, InputEvent, Insets, Key, MouseButton, Rect, Scene, UiConfig, Vec2,
    WidgetFlags, WidgetId,
};

use crate::*;

struct Ui {
    canvas: Canvas,
    ctx: Context,
    screen: Rect,
    scene: Option<Scene>,
}

impl Ui {
    fn new() -> Self {
        Self {
            canvas: Canvas::new(UiConfig::default()),
            ctx: Context::new(),
            screen: Rect::new(0.0, 0.0, 800.0, 600.0),
            scene: None,
        }
    }

    fn add(&mut self, parent: WidgetId, desc: WidgetDesc) -> WidgetId {
        self.canvas.add_child(parent, desc).unwrap()
    }

    fn root(&self) -> WidgetId {
        self.canvas.root()
    }

    fn frame(&mut self, input: &[InputEvent]) -> Vec<UiEvent> {
        self.ctx.begin();
        for e in input {
            self.ctx.handle_event(*e);
        }
        self.scene = Some(self.canvas.update(&mut self.ctx, self.screen));
        let events = self.ctx.events().to_vec();
        self.ctx.end();
        events
    }

    fn idle(&mut self, frames: usize) -> Vec<UiEvent> {
        (0..frames).flat_map(|_| self.frame(&[])).collect()
    }

    fn move_to(&mut self, x: f32, y: f32) -> Vec<UiEvent> {
        let position = Vec2::new(x, y);
        let delta = position - self.ctx.input().cursor;
        self.frame(&[InputEvent::CursorMoved { position, delta }])
    }

    /// Moves the cursor and waits for the hover transition.
    fn hover(&mut self, x: f32, y: f32) -> Vec<UiEvent> {
        let mut ev = self.move_to(x, y);
        ev.extend(self.idle(1));
        ev
    }

    fn down(&mut self) -> Vec<UiEvent> {
        self.frame(&[InputEvent::ButtonDown(MouseButton::Left)])
    }

    fn up(&mut self) -> Vec<UiEvent> {
        self.frame(&[InputEvent::ButtonUp(MouseButton::Left)])
    }

    /// Down and up on consecutive frames, then the frames needed for focus
    /// to land.
    fn click(&mut self) -> Vec<UiEvent> {
        let mut ev = self.down();
        ev.extend(self.up());
        ev.extend(self.idle(2));
        ev
    }

    fn type_keys(&mut self, input: &[InputEvent]) -> Vec<UiEvent> {
        self.frame(input)
    }

    fn widget(&self, id: WidgetId) -> &Widget {
        self.canvas.tree().get(id).unwrap()
    }

    fn flags(&self, id: WidgetId) -> WidgetFlags {
        self.widget(id).node.flags
    }

    fn rect(&self, id: WidgetId) -> Rect {
        self.widget(id).node.rect
    }

    fn layout(&self, id: WidgetId) -> Layout {
        self.widget(id).layout.unwrap()
    }

    fn scene(&self) -> &Scene {
        self.scene.as_ref().unwrap()
    }
}

fn kinds(events: &[UiEvent], id: WidgetId) -> Vec<UiEventKind> {
    events
        .iter()
        .filter(|e| e.widget == id)
        .map(|e| e.kind.clone())
        .collect()
}

fn column(ui: &mut Ui, buttons: usize) -> (WidgetId, Vec<WidgetId>) {
    let root = ui.root();
    let col = ui.add(
        root,
        Container("col", Direction::Vertical)
            .size(256.0, 512.0)
            .padding(Insets::all(4.0))
            .spacing(4.0)
            .scrollable(false, true),
    );
    let ids = (0..buttons)
        .map(|i| ui.add(col, Button(format!("b{i}"), format!("b{i}")).height(24.0)))
        .collect();
    (col, ids)
}

#[test]
fn hover_goes_to_the_last_of_overlapping_leaves() {
    let mut ui = Ui::new();
    let root = ui.root();
    let a = ui.add(root, Button("a", "A").position(10.0, 10.0).size(100.0, 40.0));
    let b = ui.add(root, Button("b", "B").position(50.0, 20.0).size(100.0, 40.0));
    ui.idle(1);

    let ev = ui.move_to(70.0, 30.0);
    assert!(kinds(&ev, b).is_empty(), "hover lands one frame after nomination");
    let ev = ui.idle(1);
    assert_eq!(kinds(&ev, b), vec![UiEventKind::HoveredEnter]);
    assert!(kinds(&ev, a).is_empty());
    assert_eq!(ui.ctx.hovered_leaf(), Some(b));
    assert!(!ui.flags(a).is_hovered());
    assert_eq!(ui.ctx.hovered_container(), Some(root));

    let ev = ui.hover(20.0, 15.0);
    assert_eq!(kinds(&ev, b), vec![UiEventKind::HoveredExit]);
    assert_eq!(kinds(&ev, a), vec![UiEventKind::HoveredEnter]);
}

#[test]
fn explicit_higher_order_wins_hover() {
    let mut ui = Ui::new();
    let root = ui.root();
    let a = ui.add(
        root,
        Button("a", "A").position(10.0, 10.0).size(100.0, 40.0).order(5),
    );
    let b = ui.add(root, Button("b", "B").position(50.0, 20.0).size(100.0, 40.0));
    ui.idle(1);
    ui.hover(70.0, 30.0);
    assert_eq!(ui.ctx.hovered_leaf(), Some(a));
    assert!(!ui.flags(b).is_hovered());
}

#[test]
fn click_fires_once_and_release_lasts_one_frame() {
    let mut ui = Ui::new();
    let root = ui.root();
    let clicks = Rc::new(Cell::new(0));
    let c = clicks.clone();
    let b = ui.add(
        root,
        Button("ok", "OK")
            .position(10.0, 10.0)
            .size(80.0, 30.0)
            .on_click(move || c.set(c.get() + 1)),
    );
    ui.idle(1);
    ui.hover(20.0, 20.0);

    assert!(kinds(&ui.down(), b).is_empty());
    let ev = ui.up();
    assert_eq!(kinds(&ev, b), vec![UiEventKind::Released]);
    assert!(ui.flags(b).is_released());
    assert!(!ui.flags(b).is_pressed());
    assert_eq!(ui.ctx.pressed(), None);
    assert_eq!(clicks.get(), 1);

    assert!(kinds(&ui.idle(1), b).is_empty());
    assert!(!ui.flags(b).is_released());
    assert_eq!(clicks.get(), 1);
    assert_eq!(ui.canvas.tree().button(b).unwrap().clicks(), 1);
}

#[test]
fn held_press_clears_on_the_release_frame() {
    let mut ui = Ui::new();
    let root = ui.root();
    let b = ui.add(root, Button("ok", "OK").position(10.0, 10.0).size(80.0, 30.0));
    ui.idle(1);
    ui.hover(20.0, 20.0);

    ui.down();
    let ev = ui.idle(1);
    assert_eq!(kinds(&ev, b), vec![UiEventKind::Pressed]);
    assert!(ui.flags(b).is_pressed());
    assert_eq!(ui.ctx.pressed(), Some(b));
    assert!(kinds(&ui.idle(1), b).is_empty(), "Pressed fires once per press");

    let ev = ui.up();
    assert_eq!(kinds(&ev, b), vec![UiEventKind::Released]);
    assert!(!ui.flags(b).is_pressed());
    assert!(!ui.ctx.input().is_down(MouseButton::Left));
    assert_eq!(ui.ctx.pressed(), None);
    assert_eq!(ui.canvas.tree().button(b).unwrap().clicks(), 1);

    assert!(kinds(&ui.idle(1), b).is_empty());
    assert!(!ui.flags(b).is_pressed());
    assert!(!ui.flags(b).is_released());
}

#[test]
fn children_outside_their_container_cannot_be_hit() {
    let mut ui = Ui::new();
    let root = ui.root();
    let list = ui.add(
        root,
        Container("list", Direction::Vertical)
            .size(200.0, 100.0)
            .scrollable(false, true),
    );
    let ids: Vec<WidgetId> = (0..10)
        .map(|i| ui.add(list, Button(format!("b{i}"), format!("b{i}")).height(24.0)))
        .collect();
    ui.idle(1);

    let clipped = ids[6];
    assert_eq!(ui.rect(clipped).y, 144.0);
    assert!(ui.rect(clipped).contains(Vec2::new(50.0, 150.0)));
    assert!(!ui.rect(list).contains(Vec2::new(50.0, 150.0)));

    let ev = ui.hover(50.0, 150.0);
    assert!(kinds(&ev, clipped).is_empty());
    assert_eq!(ui.ctx.hovered_leaf(), None);
    assert_eq!(ui.ctx.hovered_container(), Some(root));

    let ev = ui.click();
    assert!(kinds(&ev, clipped).is_empty());
    assert!(!ui.flags(clipped).is_pressed());
    assert_eq!(ui.canvas.tree().button(clipped).unwrap().clicks(), 0);

    ui.hover(50.0, 80.0);
    assert_eq!(ui.ctx.hovered_leaf(), Some(ids[3]));
    assert_eq!(ui.ctx.hovered_container(), Some(list));
}

#[test]
fn press_released_elsewhere_is_not_a_click() {
    let mut ui = Ui::new();
    let root = ui.root();
    let b = ui.add(root, Button("ok", "OK").position(10.0, 10.0).size(80.0, 30.0));
    ui.idle(1);
    ui.hover(20.0, 20.0);
    ui.down();
    assert_eq!(kinds(&ui.idle(1), b), vec![UiEventKind::Pressed]);

    let ev = ui.move_to(300.0, 300.0);
    assert_eq!(kinds(&ev, b), vec![UiEventKind::HoveredExit]);
    assert!(ui.flags(b).is_pressed(), "press survives while the button is held");

    let ev = ui.up();
    assert!(kinds(&ev, b).is_empty());
    assert!(!ui.flags(b).is_pressed());
    assert_eq!(ui.ctx.pressed(), None);
    assert_eq!(ui.canvas.tree().button(b).unwrap().clicks(), 0);
}

#[test]
fn focus_moves_between_edits_one_at_a_time() {
    let mut ui = Ui::new();
    let root = ui.root();
    let a = ui.add(root, TextEdit("a", "one").position(10.0, 10.0).size(160.0, 24.0));
    let b = ui.add(root, TextEdit("b", "two").position(10.0, 50.0).size(160.0, 24.0));
    ui.idle(1);

    ui.hover(20.0, 20.0);
    let ev = ui.click();
    assert_eq!(kinds(&ev, a).last(), Some(&UiEventKind::FocusEnter));
    assert_eq!(ui.ctx.focused(), Some(a));
    assert_eq!(ui.ctx.text_input_owner(), Some(a));

    ui.hover(20.0, 60.0);
    let mut seen = Vec::new();
    for step in 0..4 {
        let ev = match step {
            0 => ui.down(),
            1 => ui.up(),
            _ => ui.idle(1),
        };
        let focused = [a, b].iter().filter(|id| ui.flags(**id).is_focused()).count();
        assert!(focused <= 1);
        assert!(ev.iter().filter(|e| e.kind == UiEventKind::FocusEnter).count() <= 1);
        seen.extend(ev);
    }
    let exit_a = seen
        .iter()
        .position(|e| e.widget == a && e.kind == UiEventKind::FocusExit)
        .unwrap();
    let enter_b = seen
        .iter()
        .position(|e| e.widget == b && e.kind == UiEventKind::FocusEnter)
        .unwrap();
    assert!(exit_a < enter_b);
    assert_eq!(ui.ctx.focused(), Some(b));
    assert_eq!(ui.ctx.text_input_owner(), Some(b));
}

#[test]
fn programmatic_focus_exits_previous_holder_first() {
    let mut ui = Ui::new();
    let root = ui.root();
    let a = ui.add(root, TextEdit("a", "").position(10.0, 10.0));
    let b = ui.add(root, TextEdit("b", "").position(10.0, 50.0));
    let label = ui.add(root, Label("l", "not focusable"));

    ui.ctx.begin();
    ui.canvas.set_focus(&mut ui.ctx, a).unwrap();
    ui.canvas.set_focus(&mut ui.ctx, b).unwrap();
    ui.canvas.set_focus(&mut ui.ctx, label).unwrap();
    let seen: Vec<(WidgetId, UiEventKind)> = ui
        .ctx
        .events()
        .iter()
        .map(|e| (e.widget, e.kind.clone()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (a, UiEventKind::FocusEnter),
            (a, UiEventKind::FocusExit),
            (a, UiEventKind::Committed(String::new())),
            (b, UiEventKind::FocusEnter),
        ]
    );
    assert_eq!(ui.ctx.focused(), Some(b));

    ui.canvas.clear_focus(&mut ui.ctx);
    assert_eq!(ui.ctx.focused(), None);
    assert!(!ui.flags(b).is_focused());
}

#[test]
fn sixteen_buttons_fit_without_scrolling() {
    let mut ui = Ui::new();
    let (col, ids) = column(&mut ui, 16);
    ui.idle(1);

    let l = ui.layout(col);
    assert_eq!(l.content.h, 444.0);
    assert_eq!(l.scroll, Vec2::ZERO);
    assert_eq!(ui.rect(ids[0]), Rect::new(4.0, 4.0, 248.0, 24.0));
    assert_eq!(ui.rect(ids[1]).y, 32.0);
    assert_eq!(ui.rect(ids[15]).bottom(), 448.0);

    ui.hover(100.0, 100.0);
    assert_eq!(ui.ctx.hovered_container(), Some(col));
    ui.frame(&[InputEvent::Wheel {
        delta: Vec2::new(0.0, -5.0),
    }]);
    ui.idle(1);
    assert_eq!(ui.layout(col).scroll, Vec2::ZERO);
    assert_eq!(ui.rect(ids[0]).y, 4.0);
}

#[test]
fn wheel_scroll_is_clamped_and_lands_next_frame() {
    let mut ui = Ui::new();
    let (col, ids) = column(&mut ui, 30);
    ui.idle(1);
    assert_eq!(ui.layout(col).content.h, 836.0);

    ui.hover(100.0, 100.0);
    ui.frame(&[InputEvent::Wheel {
        delta: Vec2::new(0.0, -100.0),
    }]);
    assert_eq!(ui.layout(col).pending_scroll.y, 332.0);
    assert_eq!(ui.layout(col).scroll.y, 0.0);
    assert_eq!(ui.rect(ids[0]).y, 4.0);

    ui.idle(1);
    assert_eq!(ui.layout(col).scroll.y, 332.0);
    assert_eq!(ui.rect(ids[0]).y, -328.0);

    ui.frame(&[InputEvent::Wheel {
        delta: Vec2::new(0.0, 3.0),
    }]);
    ui.idle(1);
    assert_eq!(ui.layout(col).scroll.y, 260.0);
    assert_eq!(ui.layout(col).scroll.x, 0.0);
}

#[test]
fn rect_pass_is_idempotent() {
    let mut ui = Ui::new();
    let (col, ids) = column(&mut ui, 30);
    ui.idle(1);
    ui.hover(100.0, 100.0);
    ui.frame(&[InputEvent::Wheel {
        delta: Vec2::new(0.0, -4.0),
    }]);

    let snapshot = |ui: &Ui| -> Vec<Rect> { ids.iter().map(|id| ui.rect(*id)).collect() };
    let screen = ui.screen;
    ui.canvas.update_rect(&mut ui.ctx, screen);
    let first = snapshot(&ui);
    let first_layout = ui.layout(col);
    ui.canvas.update_rect(&mut ui.ctx, screen);
    assert_eq!(snapshot(&ui), first);
    assert_eq!(ui.layout(col), first_layout);
}

#[test]
fn horizontal_row_drops_trailing_spacing() {
    let mut ui = Ui::new();
    let root = ui.root();
    let row = ui.add(
        root,
        Container("row", Direction::Horizontal)
            .size(300.0, 40.0)
            .padding(Insets::all(2.0))
            .spacing(5.0),
    );
    let ids: Vec<WidgetId> = [10.0, 20.0, 30.0]
        .iter()
        .map(|w| ui.add(row, Button("x", "").size(*w, 10.0)))
        .collect();
    ui.idle(1);

    let xs: Vec<f32> = ids.iter().map(|id| ui.rect(*id).x).collect();
    assert_eq!(xs, vec![2.0, 17.0, 42.0]);
    assert_eq!(ui.layout(row).content, Rect::new(2.0, 2.0, 70.0, 10.0));
}

#[test]
fn render_skips_offscreen_leaves_and_balances_scopes() {
    let mut ui = Ui::new();
    column(&mut ui, 30);
    ui.idle(1);

    let scene = ui.scene();
    assert!(scene.is_balanced());
    let st = scene.stats();
    assert_eq!(st.clip_pushes, st.clip_pops);
    assert_eq!(st.order_pushes, st.order_pops);

    let texts = scene
        .batches()
        .iter()
        .flat_map(|b| &b.commands)
        .filter(|c| matches!(c, DrawCmd::Text { .. }))
        .count();
    assert_eq!(texts, 19);
}

#[test]
fn invisible_subtree_takes_no_part() {
    let mut ui = Ui::new();
    let root = ui.root();
    let panel = ui.add(
        root,
        Container("hidden", Direction::None)
            .size(200.0, 200.0)
            .visible(false),
    );
    let b = ui.add(panel, Button("b", "B").size(50.0, 20.0));
    ui.idle(1);
    let ev = ui.hover(10.0, 10.0);

    assert!(kinds(&ev, b).is_empty());
    assert_eq!(ui.ctx.hovered_container(), Some(root));
    assert_eq!(ui.scene().command_count(), 0);

    ui.canvas.tree_mut().set_visible(panel, true).unwrap();
    ui.idle(1);
    let ev = ui.hover(12.0, 12.0);
    assert_eq!(kinds(&ev, b), vec![UiEventKind::HoveredEnter]);
}

#[test]
fn enter_commits_once_and_drops_focus() {
    let mut ui = Ui::new();
    let root = ui.root();
    let commits = Rc::new(Cell::new(0));
    let c = commits.clone();
    let e = ui.add(
        root,
        TextEdit("e", "abc")
            .position(10.0, 10.0)
            .size(160.0, 24.0)
            .on_commit(move |_| c.set(c.get() + 1)),
    );
    ui.idle(1);
    ui.hover(20.0, 20.0);
    ui.click();
    assert_eq!(ui.ctx.focused(), Some(e));
    assert_eq!(ui.canvas.tree().text_edit(e).unwrap().cursor(), 3);

    let ev = ui.type_keys(&[InputEvent::Char('d'), InputEvent::KeyDown(Key::Enter)]);
    assert_eq!(
        kinds(&ev, e),
        vec![
            UiEventKind::Committed("abcd".into()),
            UiEventKind::FocusExit
        ]
    );
    let edit = ui.canvas.tree().text_edit(e).unwrap();
    assert_eq!(edit.value, "abcd");
    assert_eq!(edit.state(), EditState::Idle);
    assert_eq!(commits.get(), 1);
    assert_eq!(ui.ctx.focused(), None);
    assert_eq!(ui.ctx.text_input_owner(), None);
}

#[test]
fn escape_discards_the_buffer() {
    let mut ui = Ui::new();
    let root = ui.root();
    let e = ui.add(root, TextEdit("e", "abc").position(10.0, 10.0).size(160.0, 24.0));
    ui.idle(1);
    ui.hover(20.0, 20.0);
    ui.click();

    ui.type_keys(&[InputEvent::Char('x'), InputEvent::KeyDown(Key::Backspace)]);
    ui.type_keys(&[InputEvent::KeyDown(Key::Backspace)]);
    assert_eq!(ui.canvas.tree().text_edit(e).unwrap().buffer(), "ab");

    let ev = ui.type_keys(&[InputEvent::KeyDown(Key::Escape)]);
    assert_eq!(kinds(&ev, e), vec![UiEventKind::FocusExit]);
    let edit = ui.canvas.tree().text_edit(e).unwrap();
    assert_eq!(edit.value, "abc");
    assert_eq!(edit.buffer(), "abc");
}

#[test]
fn clicking_away_commits_a_changed_buffer() {
    let mut ui = Ui::new();
    let root = ui.root();
    let e = ui.add(root, TextEdit("e", "abc").position(10.0, 10.0).size(160.0, 24.0));
    ui.idle(1);
    ui.hover(20.0, 20.0);
    ui.click();
    ui.type_keys(&[InputEvent::Char('z')]);

    ui.hover(400.0, 400.0);
    let ev = ui.down();
    assert_eq!(
        kinds(&ev, e),
        vec![
            UiEventKind::FocusExit,
            UiEventKind::Committed("abcz".into())
        ]
    );
}

#[test]
fn losing_focus_commits_unless_enter_already_did() {
    let mut ui = Ui::new();
    let root = ui.root();
    let e = ui.add(
        root,
        TextEdit("e", "abc")
            .position(10.0, 10.0)
            .size(160.0, 24.0)
            .exit_focus_on_enter(false),
    );
    ui.idle(1);
    ui.hover(20.0, 20.0);
    ui.click();
    assert_eq!(ui.ctx.focused(), Some(e));

    let ev = ui.type_keys(&[InputEvent::KeyDown(Key::Enter)]);
    assert_eq!(kinds(&ev, e), vec![UiEventKind::Committed("abc".into())]);
    assert_eq!(ui.ctx.focused(), Some(e));

    ui.hover(400.0, 400.0);
    let ev = ui.down();
    assert_eq!(kinds(&ev, e), vec![UiEventKind::FocusExit]);
    ui.up();

    // unchanged buffer still commits on a plain focus loss
    ui.hover(20.0, 20.0);
    ui.click();
    assert_eq!(ui.ctx.focused(), Some(e));
    ui.hover(400.0, 400.0);
    let ev = ui.down();
    assert_eq!(
        kinds(&ev, e),
        vec![
            UiEventKind::FocusExit,
            UiEventKind::Committed("abc".into())
        ]
    );
}

#[test]
fn shift_arrows_select_and_ctrl_a_selects_all() {
    let mut ui = Ui::new();
    let root = ui.root();
    let e = ui.add(root, TextEdit("e", "hello").position(10.0, 10.0).size(160.0, 24.0));
    ui.idle(1);
    ui.hover(20.0, 20.0);
    ui.click();

    ui.type_keys(&[
        InputEvent::KeyDown(Key::ShiftLeft),
        InputEvent::KeyDown(Key::Left),
        InputEvent::KeyDown(Key::Left),
    ]);
    ui.type_keys(&[InputEvent::KeyUp(Key::ShiftLeft)]);
    assert_eq!(ui.canvas.tree().text_edit(e).unwrap().selected_text(), "lo");

    ui.type_keys(&[
        InputEvent::KeyDown(Key::ControlLeft),
        InputEvent::KeyDown(Key::Character('a')),
    ]);
    ui.type_keys(&[InputEvent::KeyUp(Key::ControlLeft)]);
    assert_eq!(ui.canvas.tree().text_edit(e).unwrap().selection(), (0, 5));

    ui.type_keys(&[InputEvent::Char('J')]);
    assert_eq!(ui.canvas.tree().text_edit(e).unwrap().buffer(), "J");
}

#[test]
fn removing_the_focused_widget_clears_the_context() {
    let mut ui = Ui::new();
    let root = ui.root();
    let e = ui.add(root, TextEdit("e", "").position(10.0, 10.0).size(160.0, 24.0));
    ui.idle(1);
    ui.hover(20.0, 20.0);
    ui.click();
    assert_eq!(ui.ctx.focused(), Some(e));

    ui.canvas.remove_widget(&mut ui.ctx, e).unwrap();
    assert_eq!(ui.ctx.focused(), None);
    assert_eq!(ui.ctx.hovered_leaf(), None);
    assert_eq!(ui.ctx.text_input_owner(), None);
    ui.idle(2);
    assert!(ui.canvas.tree().get(e).is_none());
}

#[test]
fn window_drags_by_its_title_bar() {
    let mut ui = Ui::new();
    let root = ui.root();
    let w = ui.add(
        root,
        Window("w", "Tools")
            .position(100.0, 100.0)
            .size(200.0, 150.0)
            .order(5),
    );
    ui.idle(1);
    ui.hover(150.0, 110.0);
    assert_eq!(ui.ctx.hovered_container(), Some(w));

    ui.down();
    assert_eq!(kinds(&ui.idle(1), w), vec![UiEventKind::Pressed]);
    ui.move_to(180.0, 130.0);
    assert_eq!(ui.widget(w).node.position, Vec2::new(130.0, 120.0));
    assert_eq!(ui.rect(w).x, 130.0);

    ui.up();
    ui.move_to(250.0, 200.0);
    assert_eq!(ui.widget(w).node.position, Vec2::new(130.0, 120.0));
}

#[test]
fn console_runs_committed_lines() {
    let mut ui = Ui::new();
    let root = ui.root();
    let mut console = Console::build(
        &mut ui.canvas,
        root,
        Rect::new(0.0, 0.0, 400.0, 300.0),
        20,
    )
    .unwrap();
    let mut reg = CommandRegistry::new();
    reg.register("echo", "print arguments", |args| Ok(args.join(" ")));
    ui.idle(1);

    ui.canvas.set_focus(&mut ui.ctx, console.input()).unwrap();
    let mut ran = 0;
    for input in [
        vec![InputEvent::Char('e'), InputEvent::Char('c'), InputEvent::Char('h')],
        vec![InputEvent::Char('o'), InputEvent::Char(' '), InputEvent::Char('h')],
        vec![InputEvent::Char('i'), InputEvent::KeyDown(Key::Enter)],
    ] {
        ui.type_keys(&input);
        ran += console.process(&mut ui.canvas, &mut ui.ctx, &mut reg).unwrap();
    }
    assert_eq!(ran, 1);
    assert_eq!(
        console.lines(&ui.canvas).collect::<Vec<_>>(),
        vec!["> echo hi", "hi"]
    );
    assert_eq!(ui.ctx.focused(), Some(console.input()));
    assert_eq!(ui.canvas.tree().text_edit(console.input()).unwrap().buffer(), "");

    ui.type_keys(&[InputEvent::Char('x'), InputEvent::KeyDown(Key::Enter)]);
    console.process(&mut ui.canvas, &mut ui.ctx, &mut reg).unwrap();
    let lines: Vec<_> = console.lines(&ui.canvas).collect();
    assert_eq!(lines.last(), Some(&"unknown command 'x'"));
}

#[test]
fn console_history_is_trimmed() {
    let mut ui = Ui::new();
    ui.canvas = Canvas::new(UiConfig {
        console_history: 3,
        ..Default::default()
    });
    let root = ui.root();
    let mut console =
        Console::build(&mut ui.canvas, root, Rect::new(0.0, 0.0, 300.0, 200.0), 1).unwrap();
    for i in 0..5 {
        console
            .print(&mut ui.canvas, &mut ui.ctx, &format!("line {i}"), None)
            .unwrap();
    }
    assert_eq!(console.line_count(), 3);
    assert_eq!(
        console.lines(&ui.canvas).collect::<Vec<_>>(),
        vec!["line 2", "line 3", "line 4"]
    );
    assert_eq!(ui.canvas.tree().get(console.log()).unwrap().children().len(), 3);
}

#[test]
fn scene_snapshot() {
    let mut ui = Ui::new();
    let root = ui.root();
    let w = ui.add(
        root,
        Window("w", "W").position(10.0, 10.0).size(120.0, 60.0).order(3),
    );
    let inner = ui.add(
        w,
        Container("inner", Direction::None)
            .size(40.0, 20.0)
            .order(4)
            .background(Color::WHITE),
    );
    ui.add(inner, Label("hi", "hi"));
    ui.idle(1);

    insta::assert_snapshot!(ui.scene().describe().trim_end(), @r#"
    order 3 clip 10 10 120 60
      rect 10 10 120 60 tex 0
      rect 10 10 120 20 tex 0
      text "W" at 16 12
    order 4 clip 10 30 40 20
      rect 10 30 40 20 tex 0
      text "hi" at 10 30
    "#);
}
