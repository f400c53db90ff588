//! Puffin backend for the `profiling::scope!` markers of the crate.

/// Serve profiling data on the default puffin port until the returned
/// server is dropped. Run `puffin_viewer 127.0.0.1:<port>` to inspect it.
pub fn start_puffin_server() -> Option<puffin_http::Server> {
    let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&server_addr) {
        Ok(server) => {
            tracing::info!("profiling server listening on {server_addr}");
            profiling::puffin::set_scopes_on(true);
            Some(server)
        }
        Err(error) => {
            tracing::warn!(%error, "could not start profiling server");
            None
        }
    }
}
