mod app;
mod error;
mod transform;

use argh::FromArgs;
use rectify::io::{IoError, DEFAULT_JPEG_QUALITY};

use crate::app::AppState;

#[derive(FromArgs)]
/// Serve the perspective rectification pipeline over HTTP.
struct Args {
    /// the address to bind to
    #[argh(option, default = "String::from(\"0.0.0.0\")")]
    host: String,

    /// the port to listen on
    #[argh(option, default = "8000")]
    port: u16,

    /// the JPEG quality of the returned images
    #[argh(option, default = "DEFAULT_JPEG_QUALITY")]
    quality: u8,

    /// the number of threads used to warp images
    #[argh(option)]
    num_threads: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    if !(1..=100).contains(&args.quality) {
        return Err(IoError::InvalidJpegQuality(args.quality).into());
    }

    if let Some(num_threads) = args.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    let addr = format!("{}:{}", args.host, args.port);

    log::info!("🚀 Starting the server");
    log::info!("🔥 Listening on: http://{}", addr);
    log::info!("🔧 Press Ctrl+C to stop the server");

    let app = app::router(AppState {
        quality: args.quality,
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
