//! Server startup utilities.

use hoctap_config::ServerConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    __  __          ______
   / / / /___  ____/_  __/___ _____
  / /_/ / __ \/ ___// / / __ `/ __ \
 / __  / /_/ / /__ / / / /_/ / /_/ /
/_/ /_/\____/\___//_/  \__,_/ .___/
                           /_/
    "#);
}

/// Human-readable list of the routes the server exposes.
pub fn endpoint_lines(port: u16) -> Vec<String> {
    let base = format!("http://localhost:{}", port);
    vec![
        format!("Dashboard:   {}/", base),
        format!("Health:      GET    {}/health", base),
        format!("Welcome:     GET    {}/welcome", base),
        format!("Users:       GET    {}/api/users", base),
        format!("User:        GET    {}/api/users/{{id}}", base),
        format!("Create:      POST   {}/api/users", base),
        format!("Update:      PUT    {}/api/users/{{id}}", base),
        format!("Delete:      DELETE {}/api/users/{{id}}", base),
        format!("Stats:       GET    {}/api/users/stats", base),
        format!("API Docs:    {}/swagger-ui", base),
    ]
}

/// Prints server startup information.
pub fn print_startup_info(server: &ServerConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("HocTap API listening on http://{}", server.addr());
    for line in endpoint_lines(server.port) {
        info!("{}", line);
    }
    info!("{}", separator);
}
