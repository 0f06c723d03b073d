//! User-facing message catalogue.

/// Messages shown by [`crate::AuthService`] and [`crate::LoginForm`].
pub mod auth {
    /// Login succeeded.
    pub const LOGIN_SUCCESS: &str = "Login realizado com sucesso!";
    /// Login rejected or failed.
    pub const LOGIN_ERROR: &str = "Erro ao fazer login. Confira seus dados e tente novamente.";
    /// Account created and signed in.
    pub const REGISTER_SUCCESS: &str = "Conta criada com sucesso!";
    /// Registration failed without a server message.
    pub const REGISTER_ERROR: &str = "Erro ao criar conta. Tente novamente.";
    /// Registration endpoint answered 405.
    pub const REGISTER_UNAVAILABLE: &str =
        "Registration endpoint not available. Please try again later.";
    /// Account created but the follow-up sign-in failed.
    pub const REGISTER_SIGN_IN_PENDING: &str =
        "Conta criada, mas não foi possível entrar. Faça login para continuar.";
    /// Passwords in the registration form differ.
    pub const PASSWORD_MISMATCH: &str = "As senhas não coincidem.";
    /// Logout succeeded.
    pub const LOGOUT_SUCCESS: &str = "Logout realizado com sucesso!";
    /// Logout failed.
    pub const LOGOUT_ERROR: &str = "Erro ao fazer logout. Tente novamente.";
}

/// Messages shown by the document list and actions.
pub mod documents {
    /// Loading indicator text.
    pub const LOADING: &str = "Carregando documentos...";
    /// Non-success response without a body message.
    pub const FETCH_FAILED: &str = "Failed to fetch documents";
    /// Network fault while fetching.
    pub const FETCH_ERROR: &str = "Error fetching documents";
    /// Toast shown whenever the list fails to load.
    pub const LOAD_FAILED: &str = "Failed to load documents. Please try again later.";
    /// Confirmation prompt before deleting.
    pub const DELETE_PROMPT: &str = "Tem certeza que deseja excluir este documento?";
    /// Delete failed without a body message.
    pub const DELETE_FAILED: &str = "Failed to delete document";
}

/// Inline validation messages for the login form.
pub mod validation {
    /// Email is not a valid address.
    pub const INVALID_EMAIL: &str = "Invalid email";
    /// Password shorter than six characters.
    pub const PASSWORD_TOO_SHORT: &str = "String must contain at least 6 character(s)";
}
