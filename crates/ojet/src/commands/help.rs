//! `help [task]`

use anyhow::{anyhow, Result};

use crate::router::{self, Invocation};

pub fn run(inv: &Invocation) -> Result<()> {
    match inv.params.first() {
        None => println!("{}", router::usage()),
        Some(name) => {
            let task = router::find_task(name)
                .ok_or_else(|| anyhow!("Task '{}' is not supported.", name))?;
            println!("{}", router::task_usage(task));
        }
    }
    Ok(())
}
