use log::{LevelFilter, SetLoggerError};

pub fn init_simple_logger(l: LevelFilter) -> Result<(), SetLoggerError> { 
    use simplelog::*;

    let mut cb = ConfigBuilder::new();
    cb.set_location_level(LevelFilter::Off);
    cb.set_target_level(LevelFilter::Off);
    cb.set_thread_level(LevelFilter::Off);
    cb.set_level_color(Level::Trace, Some(Color::Green));
    cb.set_level_color(Level::Debug, Some(Color::Cyan));
    let config = cb.build();

    TermLogger::init(
        l,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto
    )
}

// Returns the indentation used for recursive log output at `depth`.
pub fn indent(depth: usize) -> String { 
    "  ".repeat(depth)
}
