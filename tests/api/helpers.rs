use std::sync::{Arc, LazyLock, Mutex};

use regenflo_backend::{
    build_state,
    config::app_config::{AppConfig, SmtpConfig, SmtpTlsMode, WhatsAppConfig},
    create_app,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use wiremock::MockServer;

// Install the tracing subscriber once; set TEST_LOG to see the output
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .try_init();
    }
});

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn post_lead(&self, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/lead", self.address))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app(config: AppConfig) -> TestApp {
    LazyLock::force(&TRACING);

    let state = build_state(&config).expect("Failed to build application state");
    let app = create_app(state, config.static_dir.clone());

    // Port 0 lets the OS pick a free port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server crashed");
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    }
}

pub fn whatsapp_config(server: &MockServer) -> WhatsAppConfig {
    WhatsAppConfig {
        token: Some("test-token".into()),
        phone_id: Some("1234567890".into()),
        api_base: server.uri(),
        ..WhatsAppConfig::default()
    }
}

pub fn smtp_config(port: u16) -> SmtpConfig {
    SmtpConfig {
        host: Some("127.0.0.1".into()),
        port: Some(port),
        username: Some("mailer".into()),
        password: Some("secret".into()),
        tls: Some(SmtpTlsMode::None),
        ..SmtpConfig::default()
    }
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Just enough of an SMTP server to accept mail from lettre and keep the
/// raw DATA sections around for assertions.
pub struct SmtpSink {
    pub port: u16,
    messages: Arc<Mutex<Vec<String>>>,
}

impl SmtpSink {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind SMTP sink");
        let port = listener.local_addr().unwrap().port();
        let messages = Arc::new(Mutex::new(Vec::new()));

        let store = messages.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(smtp_session(socket, store.clone()));
            }
        });

        Self { port, messages }
    }

    pub fn received(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

async fn smtp_session(socket: TcpStream, store: Arc<Mutex<Vec<String>>>) -> std::io::Result<()> {
    let (read, mut write) = socket.into_split();
    let mut lines = BufReader::new(read).lines();
    write.write_all(b"220 localhost ESMTP sink\r\n").await?;

    let mut data: Option<String> = None;
    while let Some(line) = lines.next_line().await? {
        if let Some(buffer) = data.as_mut() {
            if line == "." {
                store.lock().unwrap().push(std::mem::take(buffer));
                data = None;
                write.write_all(b"250 2.0.0 OK queued\r\n").await?;
            } else {
                buffer.push_str(&line);
                buffer.push('\n');
            }
            continue;
        }

        let verb = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();
        match verb.as_str() {
            "EHLO" => write.write_all(b"250-localhost\r\n250 AUTH PLAIN LOGIN\r\n").await?,
            "HELO" => write.write_all(b"250 localhost\r\n").await?,
            "AUTH" => write.write_all(b"235 2.7.0 Authentication successful\r\n").await?,
            "MAIL" | "RCPT" | "RSET" | "NOOP" => write.write_all(b"250 2.0.0 OK\r\n").await?,
            "DATA" => {
                data = Some(String::new());
                write.write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n").await?;
            }
            "QUIT" => {
                write.write_all(b"221 2.0.0 Bye\r\n").await?;
                break;
            }
            _ => write.write_all(b"502 5.5.2 Command not recognized\r\n").await?,
        }
    }
    Ok(())
}
