//! Statistics reporting.

use console::style;

use crate::download::{DownloadState, GlobalState};

/// Print statistics for a single post.
pub fn print_post_stats(state: &DownloadState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {} ({}):", state.url, state.kind)).bold()
    );
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    println!("  Audio:    {}", state.audio_count);
    if state.failed_count() > 0 {
        println!("  Failed:   {}", style(state.failed_count()).red());
        for (file, reason) in &state.failures {
            println!("    {}: {}", file, style(reason).dim());
        }
    }
    println!(
        "  Total:    {} downloaded to {}",
        state.total_downloaded(),
        state.download_path.display()
    );
}

/// Print global statistics across all posts.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Posts processed: {}", state.posts_processed);
    if state.posts_failed > 0 {
        println!("  Posts failed:    {}", style(state.posts_failed).red());
    }
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    println!("  Audio:    {}", state.audio_count);
    if state.assets_failed > 0 {
        println!("  Failed:   {}", style(state.assets_failed).red());
    }
    println!("  Total:    {} downloaded", state.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}
