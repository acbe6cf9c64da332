/**
 * Initializes the logger
 *
 * https://docs.rs/slog/latest/slog/
 *
 */
use crate::config::Settings;
use slog::{o, Drain, LevelFilter, Logger};
use slog_async::Async;
use slog_term::FullFormat;

/**
 * Initializes the root logger.
 *
 * Records go through an async drain to the terminal, filtered at the
 * configured level. Components derive child loggers from the returned one.
 *
 * @param cfg The configuration settings containing the log level.
 * @return A `Logger` instance configured with the specified log level.
 */
pub fn init_logger(cfg: &Settings) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = Async::new(drain).build().fuse();

    let drain = LevelFilter::new(drain, cfg.log_level).fuse();
    Logger::root(
        drain,
        o!("app" => "url-realm", "environment" => cfg.environment.as_str()),
    )
}
