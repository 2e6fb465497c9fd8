//! Headless walkthrough: a counter menu and a command console driven by a
//! scripted input stream. Pass a JSON `UiConfig` path to override defaults.
//!
//! `RUST_LOG=debug cargo run -p console_demo` shows the widget lifecycle.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context as _;
use trellis_core::{InputEvent, Insets, Key, MouseButton, Rect, UiConfig, Vec2};
use trellis_devtools::{Inspector, dump_tree};
use trellis_ui::{
    Button, Canvas, CommandError, CommandRegistry, Console, Container, Context, Direction, Label,
};

fn load_config() -> anyhow::Result<UiConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(UiConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let cfg: UiConfig = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    log::info!("loaded config from {path}");
    Ok(cfg)
}

fn cursor(x: f32, y: f32) -> InputEvent {
    InputEvent::CursorMoved {
        position: Vec2::new(x, y),
        delta: Vec2::ZERO,
    }
}

fn typed(text: &str) -> Vec<InputEvent> {
    text.chars().map(InputEvent::Char).collect()
}

/// One entry per frame.
fn script() -> Vec<Vec<InputEvent>> {
    let mut frames = vec![vec![], vec![cursor(60.0, 44.0)], vec![]];
    for _ in 0..3 {
        frames.push(vec![InputEvent::ButtonDown(MouseButton::Left)]);
        frames.push(vec![InputEvent::ButtonUp(MouseButton::Left)]);
        frames.push(vec![]);
    }
    // focus the console input
    frames.push(vec![cursor(400.0, 372.0)]);
    frames.push(vec![]);
    frames.push(vec![InputEvent::ButtonDown(MouseButton::Left)]);
    frames.push(vec![InputEvent::ButtonUp(MouseButton::Left)]);
    frames.push(vec![]);
    frames.push(vec![]);
    for line in ["help", "add 2 40", "count", "nope"] {
        let mut f = typed(line);
        f.push(InputEvent::KeyDown(Key::Enter));
        frames.push(f);
        frames.push(vec![InputEvent::KeyUp(Key::Enter)]);
    }
    frames
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let screen = Rect::new(0.0, 0.0, 640.0, 400.0);
    let mut canvas = Canvas::new(config);
    let mut ctx = Context::new();

    let root = canvas.root();
    let clicks = Rc::new(Cell::new(0u32));
    let menu = canvas.add_child(
        root,
        Container("menu", Direction::Vertical)
            .position(16.0, 16.0)
            .size(180.0, 200.0)
            .padding(Insets::all(6.0))
            .spacing(6.0),
    )?;
    let counter = canvas.add_child(menu, Label("counter", "clicks: 0"))?;
    canvas.add_child(
        menu,
        Button("inc", "Increment").height(24.0).on_click({
            let clicks = clicks.clone();
            move || clicks.set(clicks.get() + 1)
        }),
    )?;

    let mut console = Console::build(
        &mut canvas,
        root,
        Rect::new(220.0, 160.0, 400.0, 230.0),
        10,
    )?;
    let mut registry = CommandRegistry::new();
    registry.register("add", "sum integer arguments", |args| {
        args.iter()
            .map(|a| {
                a.parse::<i64>()
                    .map_err(|e| CommandError::Failed(format!("'{a}': {e}")))
            })
            .sum::<Result<i64, _>>()
            .map(|n| n.to_string())
    });
    registry.register("count", "show the click counter", {
        let clicks = clicks.clone();
        move |_| Ok(format!("{} clicks", clicks.get()))
    });

    let mut inspector = Inspector::new();
    inspector.hud.toggle_inspector();

    let mut shown = 0;
    let mut last = None;
    for (i, input) in script().into_iter().enumerate() {
        ctx.begin();
        for e in input {
            ctx.handle_event(e);
        }
        let mut scene = canvas.update(&mut ctx, screen);
        inspector.frame(&mut scene, &canvas, &ctx);

        for e in ctx.events() {
            log::debug!("frame {i}: {:?} {:?}", e.widget, e.kind);
        }
        console.process(&mut canvas, &mut ctx, &mut registry)?;
        if clicks.get() != shown {
            shown = clicks.get();
            canvas
                .tree_mut()
                .set_label_text(counter, format!("clicks: {shown}"))?;
        }
        ctx.end();

        log::info!(
            "frame {i}: {} commands in {} batches",
            scene.command_count(),
            scene.batches().len()
        );
        last = Some(scene);
    }

    println!("{}", dump_tree(canvas.tree()));
    for line in console.lines(&canvas) {
        println!("console| {line}");
    }
    if let Some(scene) = last {
        println!("{}", scene.describe());
    }
    println!("{}", inspector.hud.status_line());
    Ok(())
}
