use dbserve::config::Config;
use dbserve::logger;
use dbserve::server::{signal, Server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_from("config")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            logger::log_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let addr = server.local_addr()?;
    logger::log_server_start(&addr, server.root());

    server.run(signal::shutdown_signal()).await;
    Ok(())
}
