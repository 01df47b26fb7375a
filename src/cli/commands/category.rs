use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_category, load_categories, save_category};
use crate::errors::AppResult;
use crate::models::category::Category;
use crate::ui::messages::{header, success, warning};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Category { add, emoji, remove } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(name) = add {
            let cat = Category::new(name, emoji.as_deref());
            save_category(&pool.conn, &cat)?;
            ttlog(&pool.conn, "category", &cat.name, &format!("saved with {}", cat.emoji))?;
            success(format!("Category {} {} saved", cat.emoji, cat.name));
        }

        if let Some(name) = remove {
            let name = name.trim().to_uppercase();
            if delete_category(&pool.conn, &name)? {
                ttlog(&pool.conn, "category", &name, "removed")?;
                success(format!("Category {} removed", name));
            } else {
                warning(format!("Category {} not found", name));
            }
        }

        header("Categories");
        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(&["", "NAME"], sep);
        for c in load_categories(&pool.conn)? {
            table.add_row(vec![c.emoji, c.name]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
