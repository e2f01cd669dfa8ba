/*!
 * Shell OS - Main Entry Point
 *
 * Boots the virtual filesystem from the JSON document on the host and runs
 * the interactive shell on stdin/stdout.
 */

use std::io;
use std::sync::Arc;
use tracing::info;

use shell_os_kernel::{init_tracing, LocalStore, MemorySource, Shell, ShellConfig, Store};

fn main() -> anyhow::Result<()> {
    let config = ShellConfig::from_env();
    init_tracing(config.trace_json);

    info!(
        storage = %config.storage_path.display(),
        hostname = %config.hostname,
        "Shell starting"
    );

    let store: Arc<dyn Store> = Arc::new(LocalStore::new(config.storage_path.clone()));
    let mut shell = Shell::boot(
        config,
        store,
        Box::new(MemorySource::new()),
        io::stdin().lock(),
        io::stdout().lock(),
    )?;
    shell.run()?;

    info!("Shell stopped");
    Ok(())
}
