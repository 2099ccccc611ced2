// Minimal HTTP responders bound to 127.0.0.1 for probe tests.
use std::{
    io::{
        Read,
        Write
    },
    net::{
        TcpListener,
        TcpStream
    },
    sync::Arc,
    thread,
    time::Duration
};

use rustls::{
    pki_types::{
        PrivateKeyDer,
        PrivatePkcs8KeyDer
    },
    ServerConfig,
    ServerConnection,
    StreamOwned
};

fn build_response(status: &str,headers: &[(&str,&str)]) -> String {
    let mut response = format!("HTTP/1.1 {status}\r\n");
    for (name,value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str("Content-Length: 0\r\nConnection: close\r\n\r\n");
    response
}

// Reads the request head up to its empty line, then answers
fn respond<S: Read + Write>(stream: &mut S,response: &str) {
    let mut head = Vec::new();
    let mut chunk = [0u8; 512];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(read) => head.extend_from_slice(&chunk[..read]),
        }
    }
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn accept_loop<F: Fn(TcpStream) + Send + Sync + 'static>(listener: TcpListener,handle: F) {
    let handle = Arc::new(handle);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let handle = Arc::clone(&handle);
            thread::spawn(move || handle(stream));
        }
    });
}

/// Answers every request with `status` and the given headers, returns the base url.
pub fn serve(status: &str,headers: &[(&str,&str)]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let response = build_response(status,headers);

    accept_loop(listener,move |mut stream| respond(&mut stream,&response));

    format!("http://{address}/")
}

/// Same as [`serve`] over TLS with a self-signed certificate issued for
/// `localhost`, returns an `https` url using the bare address.
pub fn serve_tls(status: &str,headers: &[(&str,&str)]) -> String {
    let certified = rcgen::generate_simple_self_signed(vec![String::from("localhost")]).unwrap();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));
    let config = ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![certified.cert.der().clone()],key)
        .unwrap();
    let config = Arc::new(config);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let response = build_response(status,headers);

    accept_loop(listener,move |stream| {
        let Ok(connection) = ServerConnection::new(Arc::clone(&config)) else { return };
        let mut tls = StreamOwned::new(connection,stream);
        respond(&mut tls,&response);
        tls.conn.send_close_notify();
        let _ = tls.flush();
    });

    format!("https://{address}/")
}

/// Url of a local port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}/")
}

/// Accepts connections but never answers.
pub fn silent_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
            thread::sleep(Duration::from_millis(10));
        }
    });
    format!("http://{address}/")
}
