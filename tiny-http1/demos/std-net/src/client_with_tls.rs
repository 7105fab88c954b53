/*
cargo run -p tiny-http1-demo-std-net --bin tiny_http1_demo_std_net_client_with_tls httpbin.org 443 /ip
*/

use std::env;

use tiny_http1::{Method, Message, SecureConnection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let domain = env::args()
        .nth(1)
        .unwrap_or_else(|| env::var("DOMAIN").unwrap_or("httpbin.org".to_owned()));
    let port: u16 = env::args()
        .nth(2)
        .unwrap_or_else(|| env::var("PORT").unwrap_or("443".to_owned()))
        .parse()?;
    let uri = env::args()
        .nth(3)
        .unwrap_or_else(|| env::var("URI").unwrap_or("/ip".to_owned()));

    log::info!("client {domain} {port} {uri}");

    let mut connection = SecureConnection::new();
    connection.connect(&domain, port)?;

    let mut request = Message::request(domain.to_owned(), uri, Method::GET);
    request.set_header("Accept", "*/*");
    connection.send_message(&request)?;

    let response = Message::parse_response(&connection.receive()?)?;

    println!("{:?} {:?}", response.status(), response.headers());
    println!("{}", String::from_utf8_lossy(response.body()));

    connection.close()?;

    Ok(())
}
