//! Build an in-memory offset index of every line in a file

use std::time::Instant;

use linescan::encoding_rs::UTF_8;
use linescan::{Line, LineParser};

fn main() -> linescan::Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        println!("Usage: cargo run --example line_index -- <file>");
        return Ok(());
    };

    println!("Indexing '{path}'...");

    // Map at most 16 MiB at a time no matter how large the file is.
    let parser = LineParser::new().with_max_window_size(16 << 20);

    let start = Instant::now();
    let mut index: Vec<(u64, u32)> = Vec::new();
    let mut longest: Option<Line> = None;
    parser.for_each(&path, UTF_8, |line| {
        index.push((line.offset(), line.byte_len()));
        let is_longest = longest
            .as_ref()
            .map_or(true, |l| l.byte_len() < line.byte_len());
        if is_longest {
            longest = Some(line.clone());
        }
    })?;
    let elapsed = start.elapsed();

    println!(
        "Indexed {} lines in {:.3}ms",
        index.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    println!("\nFirst entries:");
    for (offset, len) in index.iter().take(5) {
        println!("   offset {offset}, {len} bytes");
    }

    // Retained lines stay readable after the scan has unmapped its windows.
    if let Some(line) = &longest {
        let content = line.content();
        let preview = content.sub_view(0, content.len().min(60));
        println!(
            "\nLongest line starts at byte {} ({} bytes):",
            line.offset(),
            line.byte_len()
        );
        println!("   {}", preview.to_text());
    }

    Ok(())
}
