use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// The distinguished administrator is identified by this reserved
    /// address, not by a role flag on the user record.
    pub admin_email: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Address contact-form mail is delivered to.
    pub contact_email: String,
    pub uploads_dir: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("PORT must be a number");
        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@admin.com".to_string());
        let smtp_server = env::var("SMTP_SERVER").expect("SMTP_SERVER must be set");
        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .expect("SMTP_PORT must be a number");
        let smtp_username = env::var("SMTP_USERNAME").expect("SMTP_USERNAME must be set");
        let smtp_password = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD must be set");
        let contact_email = env::var("CONTACT_EMAIL").unwrap_or_else(|_| smtp_username.clone());
        let uploads_dir = env::var("UPLOADS_DIR").unwrap_or_else(|_| "public/images".to_string());

        Config {
            database_url,
            port,
            admin_email,
            smtp_server,
            smtp_port,
            smtp_username,
            smtp_password,
            contact_email,
            uploads_dir,
        }
    }
}
