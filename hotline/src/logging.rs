use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HOTLINE_LOG";

/// Installs the stderr subscriber. `HOTLINE_LOG` (an `EnvFilter` directive)
/// wins over `verbosity`; otherwise 0 => warn, 1 => info, 2+ => debug for
/// this crate.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .try_init();
}

fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let mut directives = format!("warn,hotline={level}");
    if crate::profile::enabled() && verbosity == 0 {
        directives.push_str(",hotline::profile=info");
    }
    directives
}
