use gamemaker_companion_lib::logging;
use log::error;

fn main() {
    logging::init();

    if let Err(e) = gamemaker_companion_lib::run() {
        error!("{e}");
        std::process::exit(1);
    }
}
