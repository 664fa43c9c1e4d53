pub mod portal_credentials;
