use anyhow::Result;

use super::Context;

pub fn run(ctx: &Context, id: i64) -> Result<()> {
    let mut store = ctx.open_store()?;

    let Some(title) = store.get(id).map(|e| e.title.clone()) else {
        println!("{}", ctx.theme.muted(&format!("No event with id {}", id)));
        return Ok(());
    };

    store.remove(id)?;
    println!("{}", ctx.theme.success(&format!("Deleted: {}", title)));

    Ok(())
}
