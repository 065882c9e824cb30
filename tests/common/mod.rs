use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    thread,
};

use assert_cmd::Command;

/// A canned reply for one MR number.
#[derive(Clone)]
pub enum Reply {
    Entry(&'static str),
    Status(u16),
}

/// Minimal HTTP server standing in for the MathSciNet search page.
///
/// Identifiers without a canned reply get the "No publications results" page.
pub struct StubServer {
    endpoint: String,
}

impl StubServer {
    pub fn start(replies: &[(&'static str, Reply)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("local addr");
        let replies: HashMap<&'static str, Reply> = replies.iter().cloned().collect();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = serve(stream, &replies);
            }
        });

        StubServer {
            endpoint: format!("http://{addr}/mathscinet/search/publications.html"),
        }
    }

    /// The `mr2bib` binary pointed at this server.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("mr2bib").expect("binary builds");
        cmd.env("MR2BIB_ENDPOINT", &self.endpoint)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
            cmd.env_remove(var);
        }
        cmd
    }
}

fn serve(stream: TcpStream, replies: &HashMap<&'static str, Reply>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    let id = request_line
        .split_whitespace()
        .nth(1)
        .and_then(|target| target.split_once('?'))
        .and_then(|(_, query)| {
            query
                .split('&')
                .find_map(|pair| pair.strip_prefix("s1="))
        })
        .unwrap_or_default();

    let (status, body) = match replies.get(id) {
        Some(Reply::Entry(entry)) => (
            200,
            format!("<html>\n<body>\n<pre>\n{entry}\n</pre>\n</body>\n</html>\n"),
        ),
        Some(Reply::Status(code)) => (*code, format!("<html>status {code}</html>\n")),
        None => (
            200,
            format!("<html>\n<p>No publications results for {id}</p>\n</html>\n"),
        ),
    };

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {status} Stub\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

pub const BONDAL: &str = "@article {MR1996800,\n    AUTHOR = {Bondal, A. and van den Bergh, M.},\n      YEAR = {2003},\n}";
pub const DROPPED_ZERO: &str = "@article {MR546620,\n    AUTHOR = {Someone},\n}";
