/// `idtyp` value marking an application-only token.
pub const APP_ID_TYPE: &str = "app";

/// Object id used for the development identity when no token table is configured.
pub const DEFAULT_OBJECT_ID: &str = "11111111-6a88-4768-9dfc-6bcd5187d9ed";
