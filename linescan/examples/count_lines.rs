//! Count the lines of a file and report scan throughput

use std::time::Instant;

use linescan::encoding_rs::UTF_8;
use linescan::LineParser;

fn main() -> linescan::Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        println!("Usage: cargo run --example count_lines -- <file>");
        return Ok(());
    };

    println!("Counting lines in '{path}'...");

    let start = Instant::now();
    let mut lines = 0u64;
    let mut bytes = 0u64;
    let mut longest = 0u32;
    LineParser::new().for_each(&path, UTF_8, |line| {
        lines += 1;
        bytes += u64::from(line.byte_len());
        longest = longest.max(line.byte_len());
    })?;
    let elapsed = start.elapsed();

    println!("Scanned in {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    println!("\nFile statistics:");
    println!("   Lines: {lines}");
    println!("   Content bytes: {bytes}");
    println!("   Longest line: {longest} bytes");
    if elapsed.as_secs_f64() > 0.0 {
        println!(
            "   Throughput: {:.1} MiB/s",
            bytes as f64 / (1 << 20) as f64 / elapsed.as_secs_f64()
        );
    }

    Ok(())
}
