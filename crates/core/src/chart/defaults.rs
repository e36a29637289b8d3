//! Seeded default chart of accounts.

use super::types::{Account, AccountGroup};

/// `(code, name, group, is_cash)` for every seeded account, in chart order.
const DEFAULT_ACCOUNTS: [(&str, &str, AccountGroup, bool); 17] = [
    ("1.1.1", "Caixa", AccountGroup::Asset, true),
    ("1.1.2", "Bancos Conta Movimento", AccountGroup::Asset, true),
    ("1.1.3", "Clientes", AccountGroup::Asset, false),
    ("1.1.4", "Estoques", AccountGroup::Asset, false),
    ("1.2.1", "Imobilizado", AccountGroup::Asset, false),
    ("2.1.1", "Fornecedores", AccountGroup::Liability, false),
    ("2.1.2", "Empréstimos a Pagar", AccountGroup::Liability, false),
    ("2.2.1", "Obrigações Trabalhistas", AccountGroup::Liability, false),
    ("2.2.2", "Obrigações Fiscais", AccountGroup::Liability, false),
    ("2.3.1", "Capital Social", AccountGroup::Equity, false),
    ("2.3.2", "Reservas de Lucros", AccountGroup::Equity, false),
    ("3.1.1", "Receita de Vendas", AccountGroup::Revenue, false),
    ("3.1.2", "Outras Receitas Operacionais", AccountGroup::Revenue, false),
    ("4.1.1", "Custo das Mercadorias Vendidas", AccountGroup::Expense, false),
    ("4.1.2", "Despesas com Pessoal", AccountGroup::Expense, false),
    ("4.1.3", "Despesas Administrativas", AccountGroup::Expense, false),
    ("4.1.4", "Despesas Financeiras", AccountGroup::Expense, false),
];

/// Returns the chart a new workbook starts with.
///
/// Every account carries its group's conventional nature.
#[must_use]
pub fn default_chart() -> Vec<Account> {
    DEFAULT_ACCOUNTS
        .iter()
        .map(|&(code, name, group, is_cash)| Account {
            code: code.to_string(),
            name: name.to_string(),
            group,
            nature: group.conventional_nature(),
            is_cash,
        })
        .collect()
}
