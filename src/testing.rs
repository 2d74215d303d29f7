use std::{
    io::{Read, Write},
    net::TcpListener,
    sync::{Mutex, MutexGuard},
    thread::{self, JoinHandle},
};

/// Serializes process spawning so a forked child never holds a script open for writing.
static SPAWN: Mutex<()> = Mutex::new(());

pub fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN.lock().unwrap_or_else(|err| err.into_inner())
}

/// Serves a single http response on loopback and hands back the raw request.
pub fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/last-updated.mirrorlist", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.ends_with(b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        // The client may hang up early on error statuses.
        let _ = stream.write_all(response.as_bytes());

        String::from_utf8(request).unwrap()
    });

    (url, handle)
}

/// Writes an executable `/bin/sh` script standing in for the torrent tool.
#[cfg(unix)]
pub fn script(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::{fs, os::unix::fs::PermissionsExt};

    let path = dir.join("fake-create");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
