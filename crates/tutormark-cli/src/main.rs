use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    env, fs,
    io::{Read, Stdout, stdin, stdout},
    process,
};
use tutormark_config::{Config, SchemeSetting};
use tutormark_engine::{
    ColorScheme, LogSink, MathMode, Palette, RenderNode, Segment, SegmentRenderer, Segmenter,
    SegmenterOptions, UnicodeTypesetter, gap_before, normalize,
    rendering::html,
    segmenting::snapshot::{listing, preview},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Viewer,
    Html,
    Segments,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    mode: OutputMode,
    scheme: Option<ColorScheme>,
    /// A file path, or `-` for stdin.
    input: String,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut mode = OutputMode::Viewer;
    let mut scheme = None;
    let mut input = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--html" | "--segments" if mode != OutputMode::Viewer => {
                return Err("--html and --segments cannot be combined".to_string());
            }
            "--html" => mode = OutputMode::Html,
            "--segments" => mode = OutputMode::Segments,
            "--scheme" => {
                let value = iter.next().ok_or("--scheme needs a value")?;
                scheme = Some(value.parse::<ColorScheme>().map_err(|e| e.to_string())?);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path if input.is_none() => input = Some(path.to_string()),
            extra => return Err(format!("unexpected argument {extra}")),
        }
    }

    let input = input.ok_or("no answer file given")?;
    Ok(Args {
        mode,
        scheme,
        input,
    })
}

fn read_answer(input: &str) -> Result<String> {
    if input == "-" {
        let mut answer = String::new();
        stdin()
            .read_to_string(&mut answer)
            .context("reading answer from stdin")?;
        Ok(answer)
    } else {
        fs::read_to_string(input).with_context(|| format!("reading answer file {input}"))
    }
}

fn scheme_from_config(setting: SchemeSetting) -> ColorScheme {
    match setting {
        SchemeSetting::User => ColorScheme::User,
        SchemeSetting::Assistant => ColorScheme::Assistant,
    }
}

struct App {
    segments: Vec<Segment>,
    /// The rendering of each segment, `None` where nothing is drawn.
    nodes: Vec<Option<RenderNode>>,
    /// The whitespace dropped in front of each segment.
    gaps: Vec<String>,
    list_state: ListState,
}

impl App {
    fn new(normalized: &str, segments: Vec<Segment>, renderer: &SegmentRenderer<'_>) -> Self {
        let nodes = segments.iter().map(|s| renderer.render(s)).collect();
        let gaps = (0..segments.len())
            .map(|i| gap_before(normalized, &segments, i).to_string())
            .collect();
        let mut list_state = ListState::default();
        if !segments.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            segments,
            nodes,
            gaps,
            list_state,
        }
    }

    fn next_segment(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.segments.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_segment(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.segments.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let usage = format!(
        "Usage: {} [--html | --segments] [--scheme user|assistant] <answer-file | ->",
        args.first().map(String::as_str).unwrap_or("tutormark-cli")
    );

    let parsed = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{usage}");
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let answer = read_answer(&parsed.input)?;

    let segmenter = Segmenter::new(SegmenterOptions {
        named_commands: config.named_commands.clone(),
    });
    let normalized = normalize(&answer);
    let segments = segmenter.segment_normalized(&normalized);

    let scheme = parsed
        .scheme
        .unwrap_or_else(|| scheme_from_config(config.color_scheme));
    let mut renderer = SegmentRenderer::new(&UnicodeTypesetter, &LogSink, scheme);
    if let Some(label) = config.failure_label.clone() {
        renderer = renderer.with_failure_label(label);
    }

    match parsed.mode {
        OutputMode::Html => {
            let nodes = renderer.render_answer(&normalized, &segments);
            println!("{}", html::answer_to_html(&nodes));
            Ok(())
        }
        OutputMode::Segments => {
            println!("{}", listing(&segments));
            Ok(())
        }
        OutputMode::Viewer => run_viewer(App::new(&normalized, segments, &renderer)),
    }
}

fn run_viewer(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_segment(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_segment(),
                _ => {}
            }
        }
    }
}

fn failure_style(palette: Palette) -> Style {
    let mut style = Style::default();
    if let Ok(fg) = palette.foreground.parse::<Color>() {
        style = style.fg(fg);
    }
    if let Ok(bg) = palette.background.parse::<Color>() {
        style = style.bg(bg);
    }
    style
}

/// Appends prose, starting a new line at each `\n`.
fn push_text(
    lines: &mut Vec<Line<'static>>,
    current: &mut Vec<Span<'static>>,
    text: &str,
    style: Style,
) {
    let mut parts = text.split('\n');
    if let Some(first) = parts.next() {
        current.push(Span::styled(first.to_string(), style));
    }
    for part in parts {
        lines.push(Line::from(std::mem::take(current)));
        current.push(Span::styled(part.to_string(), style));
    }
}

/// Lays the rendered nodes out as terminal lines, emphasising the node at
/// `selected`. `gaps[i]` is the whitespace shown in front of `nodes[i]`.
fn compose(
    nodes: &[Option<RenderNode>],
    gaps: &[String],
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        if let Some(gap) = gaps.get(i).filter(|g| !g.is_empty()) {
            push_text(&mut lines, &mut current, gap, Style::default());
        }
        let Some(node) = node else { continue };
        let emphasis = if selected == Some(i) {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };

        match node {
            RenderNode::Markdown(text) => push_text(&mut lines, &mut current, text, emphasis),
            RenderNode::Math {
                mode: MathMode::Inline,
                output,
            } => {
                current.push(Span::styled(
                    output.text.clone(),
                    emphasis.fg(Color::Cyan),
                ));
            }
            RenderNode::Math {
                mode: MathMode::Block,
                output,
            } => {
                if !current.is_empty() {
                    lines.push(Line::from(std::mem::take(&mut current)));
                }
                for row in output.text.lines() {
                    lines.push(
                        Line::from(Span::styled(row.to_string(), emphasis.fg(Color::Cyan)))
                            .centered(),
                    );
                }
            }
            RenderNode::Failed(marker) => {
                let span = Span::styled(
                    marker.original.clone(),
                    emphasis.patch(failure_style(marker.palette)),
                );
                match marker.mode {
                    MathMode::Inline => current.push(span),
                    MathMode::Block => {
                        if !current.is_empty() {
                            lines.push(Line::from(std::mem::take(&mut current)));
                        }
                        lines.push(Line::from(span).centered());
                    }
                }
            }
        }
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(rows[0]);

    // Segment list panel
    let items: Vec<ListItem> = app
        .segments
        .iter()
        .zip(&app.nodes)
        .map(|(segment, node)| {
            let marker = match node {
                Some(RenderNode::Failed(_)) => "✗ ",
                _ => "  ",
            };
            let text = format!(
                "{marker}{:<10} {}",
                segment.kind.as_str(),
                preview(&segment.content.replace('\n', "⏎"), 40)
            );
            let style = match node {
                Some(RenderNode::Failed(m)) => failure_style(m.palette),
                _ => Style::default(),
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let segment_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Segments"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(segment_list, chunks[0], &mut app.list_state);

    // Rendered answer panel
    let content_text = if app.nodes.iter().all(Option::is_none) {
        vec![Line::from("The answer is empty")]
    } else {
        compose(&app.nodes, &app.gaps, app.list_state.selected())
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Rendered"))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(Line::from("q: Quit | ↑/k: Previous | ↓/j: Next"));
    f.render_widget(help, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutormark_engine::{NullSink, segment};

    fn composed_text(raw: &str) -> Vec<String> {
        let renderer = SegmentRenderer::new(&UnicodeTypesetter, &NullSink, ColorScheme::User);
        let app = App::new(raw, segment(raw), &renderer);
        compose(&app.nodes, &app.gaps, None)
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_input() {
        let parsed = parse_args(&args(&["--html", "--scheme", "user", "answer.md"])).unwrap();
        assert_eq!(
            parsed,
            Args {
                mode: OutputMode::Html,
                scheme: Some(ColorScheme::User),
                input: "answer.md".into(),
            }
        );
    }

    #[test]
    fn stdin_and_viewer_are_defaults() {
        let parsed = parse_args(&args(&["-"])).unwrap();
        assert_eq!(parsed.mode, OutputMode::Viewer);
        assert_eq!(parsed.scheme, None);
        assert_eq!(parsed.input, "-");
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--html", "--segments", "a"])).is_err());
        assert!(parse_args(&args(&["--scheme"])).is_err());
        assert!(parse_args(&args(&["--scheme", "system", "a"])).is_err());
        assert!(parse_args(&args(&["--wat", "a"])).is_err());
        assert!(parse_args(&args(&["a", "b"])).is_err());
    }

    #[test]
    fn compose_keeps_inline_math_on_its_line() {
        assert_eq!(
            composed_text("Area $\\pi r^2$ here\n$$x^2$$\nbye"),
            vec!["Area π r² here", "", "x²", "", "bye"]
        );
    }

    #[test]
    fn compose_keeps_whitespace_between_expressions() {
        assert_eq!(composed_text("$a$ $b$"), vec!["a b"]);
        assert_eq!(composed_text("$a$ $b$\n\n$c$"), vec!["a b", "", "c"]);
    }

    #[test]
    fn compose_styles_failures_with_palette() {
        let renderer = SegmentRenderer::new(&UnicodeTypesetter, &NullSink, ColorScheme::User);
        let nodes: Vec<_> = segment("bad $\\nope$")
            .iter()
            .map(|s| renderer.render(s))
            .collect();

        let lines = compose(&nodes, &[], None);
        assert_eq!(lines.len(), 1);
        let failed = &lines[0].spans[1];
        assert_eq!(failed.content, "$\\nope$");
        assert_eq!(failed.style.bg, Some(Color::Rgb(0x7f, 0x1d, 0x1d)));
    }
}
