//! Login, logout, and session inspection.

use crate::App;

/// Log in and refetch the user's cart.
///
/// Invalid credentials are surfaced as a message rather than an error trace;
/// other failures propagate.
pub async fn login(
    app: &App,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = match app.session.login(username, password).await {
        Ok(user) => user,
        Err(e) if e.is_invalid_credentials() => {
            println!("Invalid username or password");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("Logged in as {} ({})", user.display_name(), user.username);

    // The cart follows the user identity.
    app.cart.handle_user_change(Some(user.id)).await;
    if let Some(cart) = app.cart.cart() {
        println!("Your cart has {} item(s).", cart.total_quantity);
    }

    Ok(())
}

/// Clear the session and discard cart state.
pub async fn logout(app: &App) {
    app.session.logout();
    app.cart.handle_user_change(None).await;
    println!("Logged out");
}

/// Show the cached session, if any.
pub fn whoami(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    match app.session.restore()? {
        Some(user) => println!(
            "{} ({}) <{}>",
            user.display_name(),
            user.username,
            user.email
        ),
        None => println!("Not logged in"),
    }
    Ok(())
}
