use super::{TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};
/// Wire protocol of a communication link
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Protocol {
    #[default]
    UnknownProtocol,
    Http,
    Https,
    Ws,
    Wss,
    ReverseProxyWebProtocol,
    ReverseProxyWebProtocolEncrypted,
    Mqtt,
    Jdbc,
    JdbcEncrypted,
    Odbc,
    OdbcEncrypted,
    SqlAccessProtocol,
    SqlAccessProtocolEncrypted,
    NosqlAccessProtocol,
    NosqlAccessProtocolEncrypted,
    Binary,
    BinaryEncrypted,
    Text,
    TextEncrypted,
    Ssh,
    SshTunnel,
    Smtp,
    SmtpEncrypted,
    Pop3,
    Pop3Encrypted,
    Imap,
    ImapEncrypted,
    Ftp,
    Ftps,
    Sftp,
    Scp,
    Ldap,
    Ldaps,
    Jms,
    Nfs,
    Smb,
    SmbEncrypted,
    LocalFileAccess,
    Nrpe,
    Xmpp,
    Iiop,
    IiopEncrypted,
    Jrmp,
    JrmpEncrypted,
    InProcessLibraryCall,
    ContainerSpawning,
}

impl Protocol {
    /// Transport encryption in place
    pub fn is_encrypted(&self) -> bool {
        matches!(
            self,
            Protocol::Https
                | Protocol::Wss
                | Protocol::ReverseProxyWebProtocolEncrypted
                | Protocol::JdbcEncrypted
                | Protocol::OdbcEncrypted
                | Protocol::SqlAccessProtocolEncrypted
                | Protocol::NosqlAccessProtocolEncrypted
                | Protocol::BinaryEncrypted
                | Protocol::TextEncrypted
                | Protocol::Ssh
                | Protocol::SshTunnel
                | Protocol::SmtpEncrypted
                | Protocol::Pop3Encrypted
                | Protocol::ImapEncrypted
                | Protocol::Ftps
                | Protocol::Sftp
                | Protocol::Scp
                | Protocol::Ldaps
                | Protocol::SmbEncrypted
                | Protocol::IiopEncrypted
                | Protocol::JrmpEncrypted
        )
    }

    /// Browser-reachable protocols
    pub fn is_potential_web_access_protocol(&self) -> bool {
        matches!(
            self,
            Protocol::Http
                | Protocol::Https
                | Protocol::Ws
                | Protocol::Wss
                | Protocol::ReverseProxyWebProtocol
                | Protocol::ReverseProxyWebProtocolEncrypted
        )
    }

    /// Never leaves the host, so there is nothing to sniff or segment
    pub fn is_process_local(&self) -> bool {
        matches!(
            self,
            Protocol::LocalFileAccess
                | Protocol::InProcessLibraryCall
                | Protocol::ContainerSpawning
        )
    }
}

impl TypeEnum for Protocol {
    const TYPE_NAME: &'static str = "Protocol";

    fn values() -> &'static [Self] {
        &[
            Protocol::UnknownProtocol,
            Protocol::Http,
            Protocol::Https,
            Protocol::Ws,
            Protocol::Wss,
            Protocol::ReverseProxyWebProtocol,
            Protocol::ReverseProxyWebProtocolEncrypted,
            Protocol::Mqtt,
            Protocol::Jdbc,
            Protocol::JdbcEncrypted,
            Protocol::Odbc,
            Protocol::OdbcEncrypted,
            Protocol::SqlAccessProtocol,
            Protocol::SqlAccessProtocolEncrypted,
            Protocol::NosqlAccessProtocol,
            Protocol::NosqlAccessProtocolEncrypted,
            Protocol::Binary,
            Protocol::BinaryEncrypted,
            Protocol::Text,
            Protocol::TextEncrypted,
            Protocol::Ssh,
            Protocol::SshTunnel,
            Protocol::Smtp,
            Protocol::SmtpEncrypted,
            Protocol::Pop3,
            Protocol::Pop3Encrypted,
            Protocol::Imap,
            Protocol::ImapEncrypted,
            Protocol::Ftp,
            Protocol::Ftps,
            Protocol::Sftp,
            Protocol::Scp,
            Protocol::Ldap,
            Protocol::Ldaps,
            Protocol::Jms,
            Protocol::Nfs,
            Protocol::Smb,
            Protocol::SmbEncrypted,
            Protocol::LocalFileAccess,
            Protocol::Nrpe,
            Protocol::Xmpp,
            Protocol::Iiop,
            Protocol::IiopEncrypted,
            Protocol::Jrmp,
            Protocol::JrmpEncrypted,
            Protocol::InProcessLibraryCall,
            Protocol::ContainerSpawning,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            Protocol::UnknownProtocol => {
                TypeDescription::new("unknown-protocol", "Unknown Protocol", "Unknown protocol")
            }
            Protocol::Http => {
                TypeDescription::new("http", "HTTP", "HTTP protocol")
            }
            Protocol::Https => {
                TypeDescription::new("https", "HTTPS", "HTTPS protocol")
            }
            Protocol::Ws => {
                TypeDescription::new("ws", "WebSocket", "WebSocket")
            }
            Protocol::Wss => {
                TypeDescription::new("wss", "WebSocket Secure", "WebSocket over TLS")
            }
            Protocol::ReverseProxyWebProtocol => TypeDescription::new(
                "reverse-proxy-web-protocol",
                "Reverse Proxy Web Protocol",
                "Reverse proxy web protocol",
            ),
            Protocol::ReverseProxyWebProtocolEncrypted => TypeDescription::new(
                "reverse-proxy-web-protocol-encrypted",
                "Reverse Proxy Web Protocol Encrypted",
                "Reverse proxy web protocol over TLS",
            ),
            Protocol::Mqtt => TypeDescription::new(
                "mqtt",
                "MQTT",
                "MQTT Message Queue Telemetry Transport Protocol",
            ),
            Protocol::Jdbc => {
                TypeDescription::new("jdbc", "JDBC", "Java Database Connectivity")
            }
            Protocol::JdbcEncrypted => TypeDescription::new(
                "jdbc-encrypted",
                "JDBC Encrypted",
                "Java Database Connectivity over TLS",
            ),
            Protocol::Odbc => {
                TypeDescription::new("odbc", "ODBC", "Open Database Connectivity")
            }
            Protocol::OdbcEncrypted => TypeDescription::new(
                "odbc-encrypted",
                "ODBC Encrypted",
                "Open Database Connectivity over TLS",
            ),
            Protocol::SqlAccessProtocol => TypeDescription::new(
                "sql-access-protocol",
                "SQL Access Protocol",
                "SQL access protocol",
            ),
            Protocol::SqlAccessProtocolEncrypted => TypeDescription::new(
                "sql-access-protocol-encrypted",
                "SQL Access Protocol Encrypted",
                "SQL access protocol over TLS",
            ),
            Protocol::NosqlAccessProtocol => TypeDescription::new(
                "nosql-access-protocol",
                "NoSQL Access Protocol",
                "NoSQL access protocol",
            ),
            Protocol::NosqlAccessProtocolEncrypted => TypeDescription::new(
                "nosql-access-protocol-encrypted",
                "NoSQL Access Protocol Encrypted",
                "NoSQL access protocol over TLS",
            ),
            Protocol::Binary => {
                TypeDescription::new("binary", "Binary", "Some other binary protocol")
            }
            Protocol::BinaryEncrypted => TypeDescription::new(
                "binary-encrypted",
                "Binary Encrypted",
                "Some other binary protocol, encrypted",
            ),
            Protocol::Text => {
                TypeDescription::new("text", "Text", "Some other text protocol")
            }
            Protocol::TextEncrypted => TypeDescription::new(
                "text-encrypted",
                "Text Encrypted",
                "Some other text protocol, encrypted",
            ),
            Protocol::Ssh => {
                TypeDescription::new("ssh", "SSH", "Secure Shell to execute commands")
            }
            Protocol::SshTunnel => {
                TypeDescription::new("ssh-tunnel", "SSH Tunnel", "Secure Shell as a tunnel")
            }
            Protocol::Smtp => {
                TypeDescription::new("smtp", "SMTP", "SMTP protocol")
            }
            Protocol::SmtpEncrypted => {
                TypeDescription::new("smtp-encrypted", "SMTP Encrypted", "SMTP protocol over TLS")
            }
            Protocol::Pop3 => {
                TypeDescription::new("pop3", "POP3", "POP3 protocol")
            }
            Protocol::Pop3Encrypted => {
                TypeDescription::new("pop3-encrypted", "POP3 Encrypted", "POP3 protocol over TLS")
            }
            Protocol::Imap => {
                TypeDescription::new("imap", "IMAP", "IMAP protocol")
            }
            Protocol::ImapEncrypted => {
                TypeDescription::new("imap-encrypted", "IMAP Encrypted", "IMAP protocol over TLS")
            }
            Protocol::Ftp => {
                TypeDescription::new("ftp", "FTP", "File Transfer Protocol")
            }
            Protocol::Ftps => {
                TypeDescription::new("ftps", "FTPS", "FTP with TLS")
            }
            Protocol::Sftp => {
                TypeDescription::new("sftp", "SFTP", "FTP over SSH")
            }
            Protocol::Scp => {
                TypeDescription::new("scp", "SCP", "Secure Shell to copy files")
            }
            Protocol::Ldap => {
                TypeDescription::new("ldap", "LDAP", "Lightweight Directory Access Protocol")
            }
            Protocol::Ldaps => {
                TypeDescription::new("ldaps", "LDAPS", "LDAP over TLS")
            }
            Protocol::Jms => {
                TypeDescription::new("jms", "JMS", "Java Message Service")
            }
            Protocol::Nfs => {
                TypeDescription::new("nfs", "NFS", "Network File System")
            }
            Protocol::Smb => {
                TypeDescription::new("smb", "SMB", "Server Message Block")
            }
            Protocol::SmbEncrypted => {
                TypeDescription::new("smb-encrypted", "SMB Encrypted", "SMB with encryption")
            }
            Protocol::LocalFileAccess => TypeDescription::new(
                "local-file-access",
                "Local File Access",
                "Data files are on the local system",
            ),
            Protocol::Nrpe => {
                TypeDescription::new("nrpe", "NRPE", "Nagios Remote Plugin Executor")
            }
            Protocol::Xmpp => {
                TypeDescription::new("xmpp", "XMPP", "Extensible Messaging and Presence Protocol")
            }
            Protocol::Iiop => {
                TypeDescription::new("iiop", "IIOP", "Internet Inter-ORB Protocol")
            }
            Protocol::IiopEncrypted => {
                TypeDescription::new("iiop-encrypted", "IIOP Encrypted", "IIOP over TLS")
            }
            Protocol::Jrmp => {
                TypeDescription::new("jrmp", "JRMP", "Java Remote Method Protocol")
            }
            Protocol::JrmpEncrypted => {
                TypeDescription::new("jrmp-encrypted", "JRMP Encrypted", "JRMP over TLS")
            }
            Protocol::InProcessLibraryCall => TypeDescription::new(
                "in-process-library-call",
                "In-Process Library Call",
                "Call to an internal library",
            ),
            Protocol::ContainerSpawning => TypeDescription::new(
                "container-spawning",
                "Container Spawning",
                "Spawn a container",
            ),
        }
    }
}

/// How the caller of a link authenticates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Authentication {
    #[default]
    None,
    Credentials,
    SessionId,
    Token,
    ClientCertificate,
    TwoFactor,
    Externalized,
}

impl TypeEnum for Authentication {
    const TYPE_NAME: &'static str = "Authentication";

    fn values() -> &'static [Self] {
        &[
            Authentication::None,
            Authentication::Credentials,
            Authentication::SessionId,
            Authentication::Token,
            Authentication::ClientCertificate,
            Authentication::TwoFactor,
            Authentication::Externalized,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            Authentication::None => {
                TypeDescription::new("none", "None", "No authentication")
            }
            Authentication::Credentials => TypeDescription::new(
                "credentials",
                "Credentials",
                "Username and password, pin or passphrase",
            ),
            Authentication::SessionId => TypeDescription::new(
                "session-id",
                "Session ID",
                "A server generated session id with limited life span",
            ),
            Authentication::Token => TypeDescription::new(
                "token",
                "Token",
                "A server generated token, containing session id, other data and is cryptographically signed",
            ),
            Authentication::ClientCertificate => TypeDescription::new(
                "client-certificate",
                "Client Certificate",
                "A certificate file stored on the client identifying this specific client",
            ),
            Authentication::TwoFactor => TypeDescription::new(
                "two-factor",
                "Two Factor",
                "Credentials plus another factor like a physical object (card) or biometrics",
            ),
            Authentication::Externalized => TypeDescription::new(
                "externalized",
                "Externalized",
                "Some local company system or remote authentication via a third party",
            ),
        }
    }
}

/// Identity under which the target of a link acts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Authorization {
    #[default]
    None,
    TechnicalUser,
    EnduserIdentityPropagation,
}

impl TypeEnum for Authorization {
    const TYPE_NAME: &'static str = "Authorization";

    fn values() -> &'static [Self] {
        &[
            Authorization::None,
            Authorization::TechnicalUser,
            Authorization::EnduserIdentityPropagation,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            Authorization::None => {
                TypeDescription::new("none", "None", "No authorization")
            }
            Authorization::TechnicalUser => TypeDescription::new(
                "technical-user",
                "Technical User",
                "Technical user (service-to-service) like DB-user credentials",
            ),
            Authorization::EnduserIdentityPropagation => TypeDescription::new(
                "enduser-identity-propagation",
                "End-User Identity Propagation",
                "Identity of end user propagates to this service",
            ),
        }
    }
}
