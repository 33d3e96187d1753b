use hashsync_demo::Args;
use log::{error, info};

#[cfg(target_arch = "wasm32")]
fn main() {
    // When building for WASM, print panics to the browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logs");

    let mounted = Args::get().and_then(|args| {
        info!("{args:?}");
        hashsync_demo::dom::mount_in_body(args.config())
    });
    match mounted {
        Ok(mounted) => mounted.forget(),
        Err(err) => error!("failed to start demo: {err}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use hashsync::MemoryNavigation;

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "hashsync_demo=info,hashsync=info");
    }
    pretty_env_logger::init();

    let args = Args::parse();
    info!("{args:?}");

    let nav = MemoryNavigation::with_base_url(args.base_url.clone());
    match hashsync_demo::walkthrough::run(&nav, args.config()) {
        Ok(steps) => {
            for step in steps {
                println!("{:<10} {:<32} {}", step.action, step.url, step.html);
            }
        }
        Err(err) => {
            error!("walkthrough failed: {err}");
            std::process::exit(1);
        }
    }
}
