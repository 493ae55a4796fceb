//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::doc::Document;
use crate::registry::{CharsetRegistry, PaletteRegistry};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Textel - create and edit tile-grid ASCII/ANSI art documents
#[derive(Parser)]
#[command(name = "txl")]
#[command(about = "Textel - create and edit tile-grid ASCII/ANSI art documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a blank document file
    New {
        /// Output document path
        output: PathBuf,

        /// Width in tiles
        #[arg(long, default_value = "80")]
        width: usize,

        /// Height in tiles
        #[arg(long, default_value = "25")]
        height: usize,

        /// Number of animation frames
        #[arg(long, default_value = "1")]
        frames: usize,

        /// Number of layers
        #[arg(long, default_value = "1")]
        layers: usize,
    },

    /// Print a document's dimensions, frames, and layer table
    Info {
        /// Input document path
        input: PathBuf,
    },

    /// Mirror every layer of every frame and write the result
    Flip {
        /// Input document path
        input: PathBuf,

        /// Output path (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mirror across the horizontal axis instead of the vertical one
        #[arg(long)]
        vertical: bool,

        /// Leave tile transforms unremapped when mirroring
        #[arg(long)]
        no_remap_transforms: bool,
    },

    /// Resize a document and write the result
    Resize {
        /// Input document path
        input: PathBuf,

        /// Output path (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// New width in tiles
        #[arg(long)]
        width: usize,

        /// New height in tiles
        #[arg(long)]
        height: usize,

        /// Left edge of the retained region when shrinking
        #[arg(long, default_value = "0")]
        origin_x: usize,

        /// Top edge of the retained region when shrinking
        #[arg(long, default_value = "0")]
        origin_y: usize,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::New { output, width, height, frames, layers } => {
            run_new(&output, width, height, frames, layers)
        }
        Commands::Info { input } => run_info(&input),
        Commands::Flip { input, output, vertical, no_remap_transforms } => {
            run_flip(&input, output.as_deref(), vertical, no_remap_transforms)
        }
        Commands::Resize { input, output, width, height, origin_x, origin_y } => {
            run_resize(&input, output.as_deref(), width, height, origin_x, origin_y)
        }
    }
}

fn load_document(input: &Path) -> Result<Document, ExitCode> {
    let charsets = CharsetRegistry::with_builtins();
    let palettes = PaletteRegistry::with_builtins();
    Document::load(input, &charsets, &palettes).map_err(|e| {
        eprintln!("error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

fn save_document(doc: &Document, path: &Path) -> ExitCode {
    match doc.save(path) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_new(output: &Path, width: usize, height: usize, frames: usize, layers: usize) -> ExitCode {
    if width == 0 || height == 0 || frames == 0 || layers == 0 {
        eprintln!("error: width, height, frames, and layers must all be positive");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    let charsets = CharsetRegistry::with_builtins();
    let palettes = PaletteRegistry::with_builtins();
    let charset = charsets.get_rc("ascii").expect("builtin charset");
    let palette = palettes.get_rc("c16").expect("builtin palette");
    let doc = Document::with_shape(charset, palette, width, height, frames, layers);
    save_document(&doc, output)
}

fn run_info(input: &Path) -> ExitCode {
    let doc = match load_document(input) {
        Ok(doc) => doc,
        Err(code) => return code,
    };
    println!("{}x{} tiles, charset '{}', palette '{}'", doc.width(), doc.height(),
        doc.charset.name, doc.palette.name);
    println!(
        "{} frame(s), {} layer(s), active frame {}, active layer {}",
        doc.frame_count(),
        doc.layer_count(),
        doc.active_frame,
        doc.active_layer
    );
    for (i, delay) in doc.frame_delays.iter().enumerate() {
        println!("  frame {}: {:.3}s", i, delay);
    }
    for (i, layer) in doc.layers.iter().enumerate() {
        println!(
            "  layer {}: '{}' z={:.2} {}",
            i,
            layer.name,
            layer.z,
            if layer.visible { "visible" } else { "hidden" }
        );
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn run_flip(
    input: &Path,
    output: Option<&Path>,
    vertical: bool,
    no_remap_transforms: bool,
) -> ExitCode {
    let mut doc = match load_document(input) {
        Ok(doc) => doc,
        Err(code) => return code,
    };
    doc.flips_remap_transforms = !no_remap_transforms;
    for frame in 0..doc.frame_count() {
        for layer in 0..doc.layer_count() {
            if vertical {
                doc.flip_vertical(frame, layer);
            } else {
                doc.flip_horizontal(frame, layer);
            }
        }
    }
    save_document(&doc, output.unwrap_or(input))
}

fn run_resize(
    input: &Path,
    output: Option<&Path>,
    width: usize,
    height: usize,
    origin_x: usize,
    origin_y: usize,
) -> ExitCode {
    if width == 0 || height == 0 {
        eprintln!("error: width and height must be positive");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    let mut doc = match load_document(input) {
        Ok(doc) => doc,
        Err(code) => return code,
    };
    if origin_x + width.min(doc.width()) > doc.width()
        || origin_y + height.min(doc.height()) > doc.height()
    {
        eprintln!("error: origin places the retained region outside the document");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    let ctx = doc.selected;
    doc.resize(width, height, origin_x, origin_y, false, ctx);
    save_document(&doc, output.unwrap_or(input))
}
