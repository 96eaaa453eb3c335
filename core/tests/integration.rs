//! End-to-end lifecycle against the fake Mailgun server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client over real
//! HTTP through `UreqTransport`. Covers authentication, form and multipart
//! bodies, repeated query keys, text payloads and error classification.

use std::io::{BufRead, BufReader, Write};

use mailgun_core::{ApiError, Config, MailgunClient, Params, Payload, UreqTransport};

const DOMAIN: &str = "samples.mailgun.org";

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// A one-shot HTTP server for bodies the mock server never produces.
fn serve_raw(status: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = reader.into_inner();
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, api_key: &str) -> MailgunClient {
    let config = Config::builder()
        .domain(DOMAIN)
        .api_key(api_key)
        .build_with_env(|_| None)
        .unwrap();
    MailgunClient::with_transport(config, UreqTransport::new(base_url, None))
}

#[test]
fn mailgun_lifecycle() {
    let base_url = start_server();
    let client = client(&base_url, mock_server::MOCK_API_KEY);

    // Step 1: no domains yet.
    let domains = client.get_domains(&Params::new()).unwrap().into_record().unwrap();
    assert_eq!(domains["total_count"], 0);

    // Step 2: sending before the domain exists is a client error.
    let err = client
        .send_message(&Params::new().with("to", "alice@example.com"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Client { status: 404, .. }), "got {err:?}");
    assert_eq!(err.message(), Some("Domain not found: samples.mailgun.org"));

    // Step 3: register the domain.
    let created = client
        .add_domain(&Params::new().with("name", DOMAIN))
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(created["domain"]["name"], DOMAIN);

    let fetched = client.get_domain(DOMAIN).unwrap().into_record().unwrap();
    assert_eq!(fetched["domain"]["state"], "unverified");

    // Step 4: send a form message to two recipients.
    let sent = client
        .send_message(
            &Params::new()
                .with("from", "postmaster@samples.mailgun.org")
                .with("to", ["alice@example.com", "bob@example.com"])
                .with("subject", "Hello")
                .with("text", "Testing some Mailgun awesomeness!"),
        )
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(sent["message"], "Queued. Thank you.");
    let key = sent["key"].as_str().unwrap().to_string();

    let stored = client.get_message(&key).unwrap().into_record().unwrap();
    assert_eq!(stored["to"], serde_json::json!(["alice@example.com", "bob@example.com"]));
    assert_eq!(stored["fields"]["subject"], "Hello");

    let mime = client.get_mime_message(&key).unwrap();
    let mime = mime.as_text().expect("raw MIME comes back as text");
    assert!(mime.contains("Subject: Hello\r\n"));
    assert!(mime.ends_with("Testing some Mailgun awesomeness!"));

    // Step 5: missing recipient is rejected with the server's message.
    let err = client
        .send_message(&Params::new().with("subject", "Nobody"))
        .unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.message(), Some("'to' parameter is missing"));

    // Step 6: multipart MIME send round-trips the raw message.
    let raw = "From: postmaster@samples.mailgun.org\r\nSubject: Raw\r\n\r\nRaw body";
    let sent = client
        .send_mime(&["carol@example.com"], raw)
        .unwrap()
        .into_record()
        .unwrap();
    let mime_key = sent["key"].as_str().unwrap().to_string();
    let mime = client.get_mime_message(&mime_key).unwrap();
    assert_eq!(mime.as_text(), Some(raw));

    client.delete_message(&mime_key).unwrap();
    let err = client.get_message(&mime_key).unwrap_err();
    assert_eq!(err.status(), Some(404));

    // Step 7: repeated query keys reach the server in order.
    let stats = client
        .get_total_stats(&Params::new().with("event", ["accepted", "delivered", "failed"]))
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(stats["events"], serde_json::json!(["accepted", "delivered", "failed"]));

    // Step 8: address validation.
    let valid = client.validate_address("alice@example.com").unwrap().into_record().unwrap();
    assert_eq!(valid["result"], "deliverable");
    let invalid = client.validate_address("not-an-address").unwrap().into_record().unwrap();
    assert_eq!(invalid["result"], "undeliverable");

    // Step 9: mailing list with one member.
    let list = "developers@samples.mailgun.org";
    client
        .add_list(&Params::new().with("address", list).with("name", "Developers"))
        .unwrap();
    client
        .add_list_member(list, &Params::new().with("address", "bob@example.com").with("name", "Bob"))
        .unwrap();

    let member = client
        .update_list_member(list, "bob@example.com", &Params::new().with("subscribed", false))
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(member["member"]["subscribed"], false);

    let renamed = client
        .update_list(list, &Params::new().with("name", "Devs"))
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(renamed["list"]["name"], "Devs");
    assert_eq!(renamed["list"]["members_count"], 1);

    client.delete_list_member(list, "bob@example.com").unwrap();
    assert!(client.get_list_member(list, "bob@example.com").unwrap_err().is_client_error());

    client.delete_list(list).unwrap();
    assert_eq!(client.get_list(list).unwrap_err().status(), Some(404));

    // Step 10: remove the domain.
    client.delete_domain(DOMAIN).unwrap();
    let err = client.get_domain(DOMAIN).unwrap_err();
    assert!(matches!(err, ApiError::Client { status: 404, .. }));
}

#[test]
fn wrong_key_is_an_authentication_error() {
    let base_url = start_server();
    let client = client(&base_url, "key-wrong");

    let err = client.get_domains(&Params::new()).unwrap_err();
    assert!(err.is_authentication_error());
    assert!(err.is_client_error());
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), Some("Invalid private key"));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let client = client("http://127.0.0.1:9", mock_server::MOCK_API_KEY);
    let err = client.get_domains(&Params::new()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[test]
fn large_mime_message_is_returned_whole() {
    let mut body = b"Subject: Big\r\n\r\n".to_vec();
    body.resize(11 * 1024 * 1024, b'x');
    let client = client(&serve_raw("200 OK", "message/rfc2822", body.clone()), mock_server::MOCK_API_KEY);

    let payload = client.get_mime_message("key").unwrap();
    assert_eq!(payload.as_bytes().map(<[u8]>::len), Some(body.len()));
}

#[test]
fn latin1_mime_message_is_returned_as_bytes() {
    let body = b"Subject: caf\xe9\r\n\r\nBody".to_vec();
    let client = client(&serve_raw("200 OK", "message/rfc2822", body.clone()), mock_server::MOCK_API_KEY);

    assert_eq!(client.get_mime_message("key").unwrap(), Payload::Binary(body));
}

#[test]
fn latin1_gateway_page_is_still_a_server_error() {
    let body = b"<html>Passerelle d\xe9faillante</html>".to_vec();
    let client = client(
        &serve_raw("502 Bad Gateway", "text/html; charset=iso-8859-1", body),
        mock_server::MOCK_API_KEY,
    );

    let err = client.get_domains(&Params::new()).unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 502, .. }), "got {err:?}");
    assert_eq!(err.message(), Some("HTTP 502 response from Mailgun API"));
}
