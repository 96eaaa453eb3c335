use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let api_key = std::env::var("MAILGUN_API_KEY").unwrap_or_else(|_| mock_server::MOCK_API_KEY.to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("fake Mailgun API listening on {addr}");
    axum::serve(listener, mock_server::app_with_key(&api_key)).await
}
