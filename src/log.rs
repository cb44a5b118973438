use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static mut _LOG_WORKER_GUARD: Vec<WorkerGuard> = vec![];

/// Initialize tracing from the `log` section of the setup config.
/// Console layer and daily-rolling file layer are both optional;
/// `level` holds EnvFilter directives (e.g. "info,sift=debug").
pub fn logging_initialize() {
    #![allow(static_mut_refs)]
    unsafe {
        if _LOG_WORKER_GUARD.len() >= 1 {
            return;
        }
    }

    let (app_name, log_conf) = {
        let setup = crate::conf::setup().read().expect("conf::setup is not initialized");
        (setup.name.clone(), setup.log.clone().unwrap_or_default())
    };

    let mut guards: Vec<WorkerGuard> = vec![];

    let console = if log_conf.console {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);
        Some(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(true))
    } else {
        None
    };

    let logs_dir = log_conf.dirs.trim().to_string();
    let persist = if logs_dir.len() > 0 {
        let prefix = format!("{}_sift.log", app_name);
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, prefix));
        guards.push(guard);
        Some(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
    } else {
        None
    };

    let filter = tracing_subscriber::EnvFilter::new(log_conf.level.as_str());
    tracing_subscriber::registry().with(console).with(persist).with(filter).init();

    unsafe {
        _LOG_WORKER_GUARD.extend(guards);
    }
}
