//! hexgrid entrypoint: prints one page of a file as a grid of digits with a
//! text preview.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::{RawBytesPerRow, load_from};
use core_layout::{CaretPosition, Metrics, MonospaceCells};
use core_model::{ByteSource, MemoryBuffer, Navigator};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

mod dump;

use dump::PageWriter;

/// Fallback when stdout is not a terminal.
const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "hexgrid", version, about = "Binary file viewer")]
struct Args {
    /// File to show. An empty document is shown when omitted.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `hexgrid.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Bytes per row: a count or `auto` to fit the terminal width.
    #[arg(long = "bytes-per-row")]
    pub bytes_per_row: Option<RawBytesPerRow>,
    /// binary | octal | decimal | hexadecimal
    #[arg(long = "code-type")]
    pub code_type: Option<String>,
    /// code_matrix | text_preview | dual
    #[arg(long = "view-mode")]
    pub view_mode: Option<String>,
    /// Byte offset to centre the page on.
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
    /// Data rows to print instead of filling the terminal height.
    #[arg(long)]
    pub rows: Option<u16>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("hexgrid.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "hexgrid.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn read_document(path: Option<&Path>) -> Result<MemoryBuffer> {
    let Some(path) = path else {
        return Ok(MemoryBuffer::new());
    };
    match std::fs::read(path) {
        Ok(bytes) => {
            tracing::debug!(
                target: "io",
                file = %path.display(),
                size_bytes = bytes.len(),
                "file_read_ok"
            );
            Ok(MemoryBuffer::from(bytes))
        }
        Err(e) => {
            error!(target: "io", ?e, file = %path.display(), "file_open_error");
            Err(e).with_context(|| format!("cannot read {}", path.display()))
        }
    }
}

/// Terminal size in cells, with the height replaced by `rows` data rows
/// plus the header line when given.
fn viewport(rows: Option<u16>) -> (u16, u16) {
    let (columns, height) = crossterm::terminal::size().unwrap_or(DEFAULT_VIEWPORT);
    let height = match rows {
        Some(rows) => rows.saturating_add(1),
        // Leave the shell prompt line free.
        None => height.saturating_sub(1),
    };
    (columns, height.max(2))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let mut config = load_from(args.config.clone())?;
    if let Some(bytes_per_row) = args.bytes_per_row.clone() {
        config.file.layout.bytes_per_row = bytes_per_row;
    }
    if let Some(code_type) = args.code_type.clone() {
        config.file.layout.code_type = code_type;
    }
    if let Some(view_mode) = args.view_mode.clone() {
        config.file.layout.view_mode = view_mode;
    }
    let settings = config.resolve().clone();

    let buffer = read_document(args.path.as_deref())?;
    let mut navigator = Navigator::new(buffer.data_size());
    settings.apply_to(&mut navigator)?;
    navigator.set_metrics(Metrics::from_provider(&MonospaceCells::default()));
    let (columns, height) = viewport(args.rows);
    navigator.set_component_bounds(0, 0, u32::from(columns), u32::from(height));

    let offset = args.offset.min(buffer.data_size());
    let section = navigator.view_mode().default_section();
    navigator.set_caret_position(CaretPosition::new(offset, 0, section));
    navigator.center_on_caret();
    info!(
        target: "runtime.startup",
        size_bytes = buffer.data_size(),
        offset,
        columns,
        height,
        bytes_per_row = navigator.structure().bytes_per_row(),
        "bootstrap_complete"
    );

    let mut out = io::stdout().lock();
    PageWriter::new(settings.digit_case).write_page(&navigator, &buffer, &mut out)?;
    out.flush()?;
    Ok(())
}
