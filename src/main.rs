#[tokio::main]
async fn main() {
    if let Err(e) = course_feedback_be::start_server().await {
        tracing::error!("Server stopped: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
