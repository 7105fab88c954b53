/*
cargo run -p tiny-http1-demo-std-net --bin tiny_http1_demo_std_net_server 127.0.0.1 8080

curl -d 'hello' http://127.0.0.1:8080/
*/

use std::env;
use std::thread;

use tiny_http1::{Message, PlainConnection, Server, StatusCode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let address = env::args().nth(1).unwrap_or_else(|| "127.0.0.1".to_owned());
    let port: u16 = env::args()
        .nth(2)
        .unwrap_or_else(|| "8080".to_owned())
        .parse()?;

    let server = Server::new(address, port);
    server.start(|connection| {
        thread::spawn(move || handle(connection));
        true
    })?;

    Ok(())
}

fn handle(mut connection: PlainConnection) {
    let response = match connection.receive_message() {
        Ok(request) => {
            log::info!(
                "{:?} {:?} {} bytes",
                request.method(),
                request.target(),
                request.body().len()
            );

            let mut response = Message::response(StatusCode::OK);
            response.set_header("Content-Type", "application/octet-stream");
            response.append_body(request.body());
            response
        }
        Err(err) => {
            log::warn!("bad request: {err}");
            Message::response(StatusCode::BAD_REQUEST)
        }
    };

    if let Err(err) = connection.send_message(&response) {
        log::warn!("could not respond: {err}");
    }
}
