use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::app::{AppContext, Result};
use crate::config::format_interval;
use crate::domain::Headlines;
use crate::subscription::{Phase, SubscriptionController};

/// Bootstrap the session and keep the headlines fresh until Ctrl-C.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut sync = ctx.feed_synchronizer()?;
    let flush_timeout = ctx.flush_timeout()?;

    let mut rx = ctx.board.subscribe();
    let render = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let headlines = rx.borrow_and_update().clone();
            print!("{}", render_headlines(&headlines));
        }
    });

    println!(
        "Refreshing every {} (Ctrl-C to quit)",
        format_interval(sync.period())
    );
    let (outcome, ()) = tokio::join!(ctx.bootstrapper.bootstrap(), sync.start());
    debug!(?outcome, "Session bootstrap finished");

    tokio::signal::ctrl_c().await?;
    println!("Shutting down...");

    if tokio::time::timeout(flush_timeout, ctx.teardown.fire())
        .await
        .is_err()
    {
        warn!("Final refresh did not finish within {:?}", flush_timeout);
    }
    sync.stop();
    render.abort();

    Ok(())
}

pub async fn headlines(ctx: &AppContext) -> Result<()> {
    let sync = ctx.feed_synchronizer()?;
    sync.fetch_once().await?;
    print!("{}", render_headlines(&ctx.board.current()));
    Ok(())
}

pub async fn subscribe(email: Option<String>) -> Result<()> {
    let mut controller = SubscriptionController::new();

    if let Some(email) = email {
        controller.on_input_change(email);
        controller.on_submit();
        print_subscription(&controller);
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while controller.accepts_input() {
        println!("Enter your email:");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        controller.on_input_change(line);
        controller.on_submit();
        print_subscription(&controller);
    }

    Ok(())
}

fn print_subscription(controller: &SubscriptionController) {
    match controller.phase() {
        Phase::Confirmed => {
            if let Some(message) = controller.confirmation_message() {
                println!("{}", message);
            }
        }
        Phase::Invalid => {
            if let Some(message) = controller.validation_message() {
                eprintln!("{}", message);
            }
        }
        Phase::Idle => {}
    }
}

pub fn render_headlines(headlines: &Headlines) -> String {
    let mut out = String::new();

    let refreshed = headlines
        .refreshed_at
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    out.push_str(&format!(
        "== Headlines ({} articles, refreshed {}) ==\n",
        headlines.len(),
        refreshed
    ));

    for (index, article) in headlines.articles.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", index + 1, article.display_title()));
        if !article.description.is_empty() {
            out.push_str(&format!("   {}\n", article.description));
        }
        if !article.url.is_empty() {
            out.push_str(&format!("   Read more: {}\n", article.url));
        }
    }

    out
}
