//! Render a small scene and print it as ASCII art.
//!
//! Run with `cargo run --example ascii --features tracing` and `RUST_LOG=trace`
//! to see every placed shape.

use sceneraster::{DocumentBuilder, Rgb, Style, TransformChain, render};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let transform = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "translate(30, 12) rotate(20)".to_string());
    let chain = TransformChain::try_parse_named("argv[1]", &transform)?;

    let mut doc = DocumentBuilder::new(60.0, 24.0);
    doc.rect(0.0, 0.0, 60.0, 24.0).style = Style::default()
        .with_fill("none")
        .with_stroke("black", 1.0);
    doc.begin_named_group("body", chain);
    doc.rounded_rect(-16.0, -6.0, 32.0, 12.0, 4.0, 4.0).style = Style::default()
        .with_fill("gray")
        .with_stroke("black", 1.0);
    doc.circle(-8.0, 0.0, 3.0).style.fill = "red".into();
    doc.circle(8.0, 0.0, 3.0).style.fill = "red".into();
    doc.line(-16.0, 8.0, 16.0, 8.0);
    doc.end_group()?;
    let doc = doc.build();
    eprint!("{doc}");

    let canvas = render(&doc, 0, 0)?;
    tracing::info!(width = canvas.width(), height = canvas.height(), "rendered");
    println!(
        "{}",
        canvas.to_ascii(|p| match p {
            Rgb::WHITE => ' ',
            Rgb::BLACK => '#',
            p if p.r > p.g => 'o',
            _ => '.',
        })
    );
    Ok(())
}
