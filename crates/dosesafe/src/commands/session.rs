use dosesafe_core::SignupForm;

use super::Context;

pub fn run_signup(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> anyhow::Result<()> {
    let form = SignupForm {
        name,
        email,
        password,
        confirm_password,
    };
    let user = ctx.session().register(&form)?;
    println!("Welcome, {}! Account created for {}", user.name, user.email);
    Ok(())
}

pub fn run_login(ctx: &Context, email: &str, password: &str) -> anyhow::Result<()> {
    let user = ctx.session().login(email, password)?;
    println!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

pub fn run_logout(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.session();
    if !session.is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }
    session.logout()?;
    println!("Signed out");
    Ok(())
}

pub fn run_whoami(ctx: &Context) -> anyhow::Result<()> {
    let user = ctx.require_user()?;
    println!("{} <{}>", user.name, user.email);
    println!("Member since {}", user.created_at.format("%Y-%m-%d"));
    Ok(())
}
