//! A drop-down command console built from the stock widgets: a window, a
//! scrolling log of labels, and a text edit that feeds a command registry.

use std::collections::{BTreeMap, VecDeque};

use thiserror::Error;
use trellis_core::{Color, Insets, Rect, TreeError, WidgetId};

use crate::canvas::Canvas;
use crate::context::{Context, UiEventKind};
use crate::layout::Direction;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("{0}")]
    Failed(String),
}

type Handler = Box<dyn FnMut(&[&str]) -> Result<String, CommandError>>;

struct Command {
    help: String,
    handler: Handler,
}

/// Named commands, looked up by the first word of a line.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, replacing any earlier command of that name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        handler: impl FnMut(&[&str]) -> Result<String, CommandError> + 'static,
    ) {
        let name = name.into();
        if self.commands.contains_key(&name) {
            log::warn!("command '{name}' registered twice; keeping the newer one");
        }
        self.commands.insert(
            name,
            Command {
                help: help.into(),
                handler: Box::new(handler),
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    fn help_text(&self) -> String {
        self.commands
            .iter()
            .map(|(name, c)| format!("{name} - {}", c.help))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Splits `line` on whitespace and runs the named command with the rest
    /// as arguments. `help` lists commands unless something else claimed it.
    pub fn execute(&mut self, line: &str) -> Result<String, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();
        match self.commands.get_mut(name) {
            Some(cmd) => (cmd.handler)(&args),
            None if name == "help" => Ok(self.help_text()),
            None => Err(CommandError::Unknown(name.to_owned())),
        }
    }
}

pub struct Console {
    window: WidgetId,
    log: WidgetId,
    input: WidgetId,
    lines: VecDeque<WidgetId>,
}

impl Console {
    /// Builds the console window under `parent`, covering `rect`, with every
    /// part painted at `order`.
    pub fn build(
        canvas: &mut Canvas,
        parent: WidgetId,
        rect: Rect,
        order: u8,
    ) -> Result<Self, TreeError> {
        let (title_h, line_h) = {
            let res = canvas.resources();
            (res.config.window_title_height, res.font.line_height())
        };
        let pad = 4.0;
        let input_h = line_h + 8.0;
        let log_h = (rect.h - title_h - pad * 3.0 - input_h).max(line_h);

        let window = canvas.add_child(
            parent,
            crate::Window("console", "Console")
                .position(rect.x, rect.y)
                .size(rect.w, rect.h)
                .order(order)
                .direction(Direction::Vertical)
                .padding(Insets::all(pad))
                .spacing(pad),
        )?;
        let log = canvas.add_child(
            window,
            crate::Container("console.log", Direction::Vertical)
                .height(log_h)
                .order(order)
                .spacing(2.0)
                .scrollable(false, true),
        )?;
        let input = canvas.add_child(
            window,
            crate::TextEdit("console.input", "")
                .height(input_h)
                .order(order)
                .placeholder("type 'help'")
                .exit_focus_on_enter(false)
                .commit_on_lost_focus(false),
        )?;
        Ok(Self {
            window,
            log,
            input,
            lines: VecDeque::new(),
        })
    }

    pub fn window(&self) -> WidgetId {
        self.window
    }

    pub fn input(&self) -> WidgetId {
        self.input
    }

    pub fn log(&self) -> WidgetId {
        self.log
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of the visible log, oldest first.
    pub fn lines<'a>(&'a self, canvas: &'a Canvas) -> impl Iterator<Item = &'a str> + 'a {
        self.lines
            .iter()
            .filter_map(|id| canvas.tree().label(*id).map(|l| l.text.as_str()))
    }

    pub fn set_visible(&self, canvas: &mut Canvas, visible: bool) -> Result<(), TreeError> {
        canvas.tree_mut().set_visible(self.window, visible)
    }

    /// Appends each line of `text` to the log, dropping the oldest lines
    /// past the configured history.
    pub fn print(
        &mut self,
        canvas: &mut Canvas,
        ctx: &mut Context,
        text: &str,
        color: Option<Color>,
    ) -> Result<(), TreeError> {
        let order = canvas.tree().get(self.log).map(|w| w.node.order).unwrap_or(0);
        for line in text.lines() {
            let mut desc = crate::Label("console.line", line).order(order);
            if let Some(c) = color {
                desc = desc.text_color(c);
            }
            let id = canvas.add_child(self.log, desc)?;
            self.lines.push_back(id);
        }

        let history = canvas.resources().config.console_history.max(1);
        while self.lines.len() > history {
            if let Some(old) = self.lines.pop_front() {
                canvas.remove_widget(ctx, old)?;
            }
        }

        if let Some(l) = canvas
            .tree_mut()
            .get_mut(self.log)
            .and_then(|w| w.layout.as_mut())
        {
            l.scroll_to_end();
        }
        Ok(())
    }

    /// Runs every line committed in the input this frame. Returns how many
    /// command lines were run.
    pub fn process(
        &mut self,
        canvas: &mut Canvas,
        ctx: &mut Context,
        registry: &mut CommandRegistry,
    ) -> Result<usize, TreeError> {
        let committed: Vec<String> = ctx
            .events_for(self.input)
            .filter_map(|k| match k {
                UiEventKind::Committed(text) => Some(text.clone()),
                _ => None,
            })
            .collect();

        let mut ran = 0;
        for line in committed {
            if let Some(t) = canvas.tree_mut().text_edit_mut(self.input) {
                t.clear();
            }
            if line.trim().is_empty() {
                continue;
            }
            let (muted, error) = {
                let th = canvas.resources().theme();
                (th.text_muted, th.error)
            };
            self.print(canvas, ctx, &format!("> {line}"), Some(muted))?;
            match registry.execute(&line) {
                Ok(out) => self.print(canvas, ctx, &out, None)?,
                Err(e) => {
                    log::info!("console command failed: {e}");
                    self.print(canvas, ctx, &e.to_string(), Some(error))?
                }
            }
            ran += 1;
        }
        Ok(ran)
    }
}
