use anyhow::Result;
use clap::{Args, Subcommand};
use portfolio_core::{Employee, EmployeeStore, NewEmployee};

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// List all employees
    List,
    /// Add a new employee
    Add(EmployeeFields),
    /// Replace an employee's fields
    Update {
        id: u64,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee
    Delete { id: u64 },
}

#[derive(Args)]
pub struct EmployeeFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    role: String,
    #[arg(long)]
    salary: String,
}

impl From<EmployeeFields> for NewEmployee {
    fn from(f: EmployeeFields) -> Self {
        NewEmployee {
            name: f.name,
            age: f.age,
            email: f.email,
            role: f.role,
            salary: f.salary,
        }
    }
}

/// Run one employee command, printing the outcome the way the table's toasts read.
pub async fn run(store: &EmployeeStore, command: EmployeeCommand) -> Result<()> {
    match command {
        EmployeeCommand::List => {
            let employees = store.list().await?;
            print_table(&employees);
        }
        EmployeeCommand::Add(fields) => {
            store.create(&fields.into()).await?;
            println!("Funcionário criado com sucesso");
        }
        EmployeeCommand::Update { id, fields } => {
            store.update(id, &fields.into()).await?;
            println!("Funcionário atualizado com sucesso");
        }
        EmployeeCommand::Delete { id } => {
            store.delete(id).await?;
            println!("Funcionário deletado com sucesso");
        }
    }
    Ok(())
}

fn format_row(employee: &Employee) -> String {
    let id = employee.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let f = &employee.fields;
    format!(
        "{:>4}  {:<20} {:>4}  {:<28} {:<16} ${}",
        id, f.name, f.age, f.email, f.role, f.salary
    )
}

fn print_table(employees: &[Employee]) {
    println!(
        "{:>4}  {:<20} {:>4}  {:<28} {:<16} {}",
        "ID", "Name", "Age", "Email", "Role", "Salary"
    );
    for employee in employees {
        println!("{}", format_row(employee));
    }
    if employees.is_empty() {
        println!("(nenhum funcionário)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row() {
        let employee = Employee {
            id: Some(3),
            fields: NewEmployee {
                name: "Ana".into(),
                age: "31".into(),
                email: "ana@example.com".into(),
                role: "Dev".into(),
                salary: "5000".into(),
            },
        };
        let row = format_row(&employee);
        assert!(row.starts_with("   3  Ana"));
        assert!(row.ends_with("$5000"));
    }
}
