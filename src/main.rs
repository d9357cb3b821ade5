mod app;
mod input;
mod render;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, which the alternate screen hides; keep the default quiet.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    let args = app::Args::parse();
    app::run(args)
}
