use rowgraph_core::{Error, Result};
use url::Url;

/// Credentials and location of a MySQL database.
///
/// `net` is either `tcp`, with `addr` as `host[:port]`, or `unix`, with
/// `addr` as the socket path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    user: String,
    pass: String,
    net: String,
    addr: String,
    dbname: String,
}

const DEFAULT_PORT: u16 = 3306;

impl Config {
    pub fn new() -> Config {
        Config {
            net: "tcp".to_string(),
            ..Config::default()
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn set_user(&mut self, user: impl Into<String>) -> &mut Self {
        self.user = user.into();
        self
    }

    pub fn pass(&self) -> &str {
        &self.pass
    }

    pub fn set_pass(&mut self, pass: impl Into<String>) -> &mut Self {
        self.pass = pass.into();
        self
    }

    pub fn net(&self) -> &str {
        &self.net
    }

    pub fn set_net(&mut self, net: impl Into<String>) -> &mut Self {
        self.net = net.into();
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn set_addr(&mut self, addr: impl Into<String>) -> &mut Self {
        self.addr = addr.into();
        self
    }

    pub fn dbname(&self) -> &str {
        &self.dbname
    }

    pub fn set_dbname(&mut self, dbname: impl Into<String>) -> &mut Self {
        self.dbname = dbname.into();
        self
    }

    /// Connection options for the pool.
    pub fn to_opts(&self) -> Result<mysql_async::Opts> {
        let mut builder = mysql_async::OptsBuilder::default()
            .user(non_empty(&self.user))
            .pass(non_empty(&self.pass))
            .db_name(non_empty(&self.dbname))
            .client_found_rows(true);

        match &self.net[..] {
            "" | "tcp" => {
                let (host, port) = self.host_port()?;
                builder = builder.ip_or_hostname(host).tcp_port(port);
            }
            "unix" => {
                builder = builder.socket(Some(self.addr.clone()));
            }
            net => {
                return Err(Error::invalid_connection_url(format!(
                    "unsupported network `{net}`; expected `tcp` or `unix`"
                )))
            }
        }

        Ok(builder.into())
    }

    /// Formats the configuration as a `mysql://` URL.
    pub fn to_url(&self) -> Result<String> {
        let (host, port) = match &self.net[..] {
            "unix" => ("localhost".to_string(), DEFAULT_PORT),
            _ => self.host_port()?,
        };

        let mut url = Url::parse(&format!("mysql://{host}:{port}/"))
            .map_err(|err| Error::invalid_connection_url(err.to_string()))?;

        url.set_path(&self.dbname);

        if !self.user.is_empty() {
            url.set_username(&self.user)
                .map_err(|_| Error::invalid_connection_url("cannot set user"))?;
        }

        if !self.pass.is_empty() {
            url.set_password(Some(&self.pass))
                .map_err(|_| Error::invalid_connection_url("cannot set password"))?;
        }

        if self.net == "unix" {
            url.query_pairs_mut().append_pair("socket", &self.addr);
        }

        Ok(url.into())
    }

    fn host_port(&self) -> Result<(String, u16)> {
        if self.addr.is_empty() {
            return Err(Error::invalid_connection_url("missing address"));
        }

        match self.addr.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse().map_err(|_| {
                    Error::invalid_connection_url(format!("invalid port in address `{}`", self.addr))
                })?;
                Ok((host.to_string(), port))
            }
            None => Ok((self.addr.clone(), DEFAULT_PORT)),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
