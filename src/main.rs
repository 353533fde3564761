use std::env;

use rexblog::config::{read_config, Config};
use rexblog::logger::configure_logger;
use rexblog::server::server_run;

fn open_config() -> Config {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap();
    println!("cur_dir: {}", env::current_dir().unwrap().display());
    read_config(&exe_dir.join("rexblog.toml")).unwrap()
}

#[ntex::main]
async fn main() -> std::io::Result<()> {
    let config = open_config();
    if let Err(e) = configure_logger(&config) {
        eprintln!("Error configuring logger: {}", e);
    }

    println!("Listening on {}:{}", config.server.address, config.server.port);
    server_run(config).await
}
