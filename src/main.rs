use clap::Parser;
use color_eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use jqed::App;
use jqed::app::register_interrupts;
use jqed::config::{self, Config};
use jqed::error::JqedError;
use jqed::evaluator::{self, EvaluatorCommand};

type TtyTerminal = Terminal<CrosstermBackend<File>>;

/// Interactive jq editor
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Edit a jq expression interactively against JSON piped on standard input"
)]
struct Args {
    /// Initial jq expression
    expression: Option<String>,
}

fn main() -> Result<ExitCode> {
    // Writes to /tmp/jqed-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/jqed-debug.log")
            .expect("Failed to open /tmp/jqed-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== JQED DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    let args = Args::parse();

    // Load config early to avoid defaults during app initialization
    let config_result = config::load_config();

    if io::stdin().is_terminal() {
        eprintln!("{}", JqedError::SourceIsTerminal);
        return Ok(ExitCode::FAILURE);
    }

    let evaluator = match locate_evaluator(&config_result.config) {
        Ok(evaluator) => evaluator,
        Err(e) => {
            report_to_stdout(&format!("{}\n", e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let interrupt = register_interrupts()?;
    let terminal = init_terminal()?;

    let mut app = App::new(
        io::stdin(),
        args.expression.as_deref().unwrap_or(""),
        &config_result.config,
        evaluator,
    );
    app.set_interrupt_flag(interrupt);
    if let Some(warning) = config_result.warning {
        app.view.show_warning(&warning);
    }

    let result = run(terminal, &mut app);

    restore_terminal()?;
    result?;

    // Output after terminal restore to prevent corruption
    write_trailer(&app)?;

    #[cfg(debug_assertions)]
    log::debug!("=== JQED DEBUG SESSION ENDED ===");

    Ok(ExitCode::SUCCESS)
}

/// Resolve the configured evaluator in PATH before any UI is shown
fn locate_evaluator(config: &Config) -> Result<EvaluatorCommand, JqedError> {
    let program = evaluator::locate(&config.evaluator.command)?;
    Ok(EvaluatorCommand::new(program, config.evaluator.args.clone()))
}

/// Write a startup failure to stdout, or to stderr when stdout is closed
fn report_to_stdout(message: &str) {
    let mut stdout = io::stdout().lock();
    if stdout
        .write_all(message.as_bytes())
        .and_then(|_| stdout.flush())
        .is_err()
    {
        eprint!("{}", message);
    }
}

fn open_tty() -> io::Result<File> {
    OpenOptions::new().read(true).write(true).open("/dev/tty")
}

/// Initialize the controlling terminal with raw mode, alternate screen, and bracketed paste
///
/// Standard input carries the JSON source and standard output is reserved for
/// the exit trailer, so the UI talks to /dev/tty directly.
fn init_terminal() -> Result<TtyTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Ok(mut tty) = open_tty() {
            let _ = execute!(tty, DisableBracketedPaste, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();
        hook(info);
    }));

    let mut tty = open_tty()?;
    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(tty, EnterAlternateScreen, EnableBracketedPaste) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match Terminal::new(CrosstermBackend::new(tty)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = restore_terminal();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    if let Ok(mut tty) = open_tty() {
        let _ = execute!(tty, DisableBracketedPaste, LeaveAlternateScreen);
    }
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: TtyTerminal, app: &mut App) -> Result<()> {
    if let Ok(size) = terminal.size() {
        app.handle_resize(size.height);
    }

    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Print the live output and the final command to the original stdout
fn write_trailer(app: &App) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout
        .write_all(app.exit_trailer().as_bytes())
        .and_then(|_| stdout.flush())
    {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            eprint!("{}", app.exit_command());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
