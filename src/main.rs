use std::path::{Path, PathBuf};

use baked_text::config::Config;
use baked_text::{Quad, TextRenderer};

const DEFAULT_TEXT: &str = "The quick brown fox\njumps over the lazy dog.";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-config") {
        let config = Config::default();
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => fail(&e),
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("bakedtext {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("bakedtext {}", env!("CARGO_PKG_VERSION"));
        println!("Bake a font into a glyph atlas and lay out text against it\n");
        println!("USAGE:");
        println!("    bakedtext [OPTIONS]\n");
        println!("OPTIONS:");
        println!("    --font PATH         Font file to bake (overrides font.path)");
        println!("    --size PX           Pixel height to bake at (overrides font.size)");
        println!("    --text TEXT         Text to lay out");
        println!("    --dump-atlas PNG    Write the baked atlas as a grayscale PNG");
        println!("    --write-config      Save the effective configuration");
        println!("    --print-config      Print the default configuration to stdout");
        println!("    --version, -V       Print version information");
        println!("    --help, -h          Print this help message");
        return;
    }

    let mut config = Config::load();
    if let Some(path) = arg_value(&args, "--font") {
        config.font.path = Some(PathBuf::from(path));
    }
    if let Some(size) = arg_value(&args, "--size") {
        match size.parse::<f32>() {
            Ok(px) => config.font.size = px,
            Err(e) => fail(&format!("invalid --size {size:?}: {e}")),
        }
    }
    if args.iter().any(|a| a == "--write-config") {
        config.save();
    }

    let renderer = match TextRenderer::from_config(&config) {
        Ok(r) => r,
        Err(e) => fail(&e),
    };

    let text = arg_value(&args, "--text").unwrap_or(DEFAULT_TEXT);
    let mut quads: Vec<Quad> = Vec::new();
    renderer.draw_string(0.0, 0.0, text, &mut quads);
    for q in &quads {
        println!(
            "quad ({:.1}, {:.1})-({:.1}, {:.1}) uv ({:.4}, {:.4})-({:.4}, {:.4})",
            q.x0, q.y0, q.x1, q.y1, q.s0, q.t0, q.s1, q.t1
        );
    }

    // Widths are measured per line over UTF-16 offsets.
    let mut start = 0;
    for line in text.split('\n') {
        let len = line.encode_utf16().count();
        let width = renderer.string_width(line, 0, len);
        println!("line @{start}: width {width:.2}px {line:?}");
        start += len + 1;
    }
    println!(
        "{} quads, {} glyphs baked at {}px",
        quads.len(),
        renderer.atlas().glyphs().len(),
        renderer.font_size()
    );

    if let Some(png) = arg_value(&args, "--dump-atlas") {
        if let Err(e) = renderer.atlas().save_png(Path::new(png)) {
            fail(&e);
        }
        println!("atlas written to {png}");
    }
}

/// Value following `name` on the command line.
fn arg_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("error: {e}");
    std::process::exit(1);
}
