//! Demo binary: seeds the stores with sample data and prints a
//! dashboard snapshot. With GEMINI_API_KEY set it also sends one
//! question to MestreIA.

use anyhow::Result;
use chrono::{Datelike, Duration};
use log::info;

use contamestre_backend::domain::commands::boletos::UpsertBoletoCommand;
use contamestre_backend::domain::commands::community::{CreatePostCommand, FeedQuery};
use contamestre_backend::domain::commands::events::CreateEventCommand;
use contamestre_backend::domain::commands::goals::CreateGoalCommand;
use contamestre_backend::domain::commands::transactions::CreateTransactionCommand;
use contamestre_backend::Backend;
use shared::{
    format_brl, CommunityTopic, DreInput, EventStatus, Reminder, TransactionType, Urgency,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    info!("Starting ContaMestre backend demo");

    let backend = Backend::new()?;
    seed(&backend)?;

    let today = Backend::today();
    let transactions = backend.transaction_service.all_transactions();

    let kpis = backend.dashboard_service.kpi_summary(&transactions, today);
    println!("Saldo total:        {}", format_brl(kpis.total_balance));
    println!("Receitas do mês:    {}", format_brl(kpis.monthly_income));
    println!("Despesas do mês:    {}", format_brl(kpis.monthly_expenses));
    match &kpis.next_bill {
        Some(bill) => println!(
            "Próxima conta:      {} ({}) em {} dia(s)",
            bill.description,
            format_brl(bill.amount),
            bill.days_until
        ),
        None => println!("Próxima conta:      nenhuma"),
    }

    println!("\nContas a vencer:");
    let events = backend.event_service.list_events();
    for bill in backend
        .dashboard_service
        .upcoming_bills(&events, &backend.event_service, today, 5)
    {
        println!(
            "  {} - {} ({}, urgência {})",
            bill.title,
            format_brl(bill.amount),
            bill.countdown,
            bill.urgency.label_pt()
        );
    }

    println!("\nChecklist de boletos:");
    for item in backend.boleto_service.checklist(&backend.event_service, today) {
        println!(
            "  [{}] {} - {} (vence {})",
            item.urgency_label,
            item.boleto.name,
            format_brl(item.boleto.amount),
            item.boleto.due_date
        );
    }

    println!("\nMetas:");
    for goal in backend.goal_service.list_goals() {
        println!(
            "  {} - {} de {} ({:.0}%)",
            goal.name,
            format_brl(goal.current_amount),
            format_brl(goal.target_amount),
            goal.display_progress_percent()
        );
    }

    let assessment = backend.tax_service.assess(60000.0, 5000.0);
    println!(
        "\nSimulação IRPF (renda R$ 60.000,00): imposto {} (alíquota efetiva {:.2}%)",
        format_brl(assessment.tax_due),
        assessment.effective_rate
    );

    let statement = backend.report_service.dre_statement(DreInput {
        gross_revenue: 100000.0,
        deductions: 8000.0,
        cmv: 35000.0,
        operating_expenses: 22000.0,
        financial_result: -1500.0,
        tax_estimate: 6000.0,
    });
    let path = backend.report_service.export_dre_csv(&statement, None)?;
    println!("DRE exportada para {}", path.display());

    println!("\nComunidade ({} publicações):", backend.community_service.feed(FeedQuery::default()).len());
    for post in backend.community_service.feed(FeedQuery::default()) {
        println!("  [{}] {}: {}", post.topic, post.author, post.content);
    }

    if let Some(assistant) = &backend.assistant_service {
        let reply = assistant
            .ask(
                "Como está minha saúde financeira este mês?",
                backend.assistant_user_data(),
            )
            .await?;
        println!("\nMestreIA: {}", reply);
    }

    Ok(())
}

fn seed(backend: &Backend) -> Result<()> {
    let today = Backend::today();
    let first_of_month = today.with_day(1).unwrap_or(today);

    let transactions = [
        ("Salário", 8500.0, TransactionType::Income, "Salário", first_of_month),
        ("Freelance site", 1200.0, TransactionType::Income, "Extra", first_of_month + Duration::days(4)),
        ("Aluguel", 1800.0, TransactionType::Expense, "Moradia", first_of_month + Duration::days(4)),
        ("Supermercado", 650.0, TransactionType::Expense, "Alimentação", first_of_month + Duration::days(7)),
        ("Internet", 99.9, TransactionType::Expense, "Moradia", today + Duration::days(5)),
        ("Fatura Cartão", 2300.0, TransactionType::Expense, "Cartão", today + Duration::days(10)),
    ];
    for (description, amount, tx_type, category, date) in transactions {
        backend
            .transaction_service
            .create_transaction(CreateTransactionCommand {
                description: description.to_string(),
                amount,
                transaction_type: tx_type,
                category: category.to_string(),
                date,
            })?;
    }

    let goals = [
        ("Viagem para a Europa", 7500.0, 20000.0),
        ("Reserva de Emergência", 12000.0, 15000.0),
        ("Entrada do Apartamento", 23500.0, 50000.0),
    ];
    for (name, current, target) in goals {
        backend.goal_service.create_goal(CreateGoalCommand {
            name: name.to_string(),
            current_amount: current,
            target_amount: target,
            target_date: today + Duration::days(180),
        })?;
    }

    let events = [
        ("Aluguel", 1800.0, 1i64, EventStatus::Pending, Urgency::High),
        ("Fatura Cartão", 2300.0, 10, EventStatus::Pending, Urgency::Medium),
        ("Internet", 99.9, 5, EventStatus::Pending, Urgency::Low),
        ("Conta de Luz", 230.0, -2, EventStatus::Overdue, Urgency::High),
        ("Salário", 8500.0, 15, EventStatus::Pending, Urgency::Low),
    ];
    for (title, amount, offset, status, urgency) in events {
        backend.event_service.create_event(CreateEventCommand {
            title: title.to_string(),
            date: today + Duration::days(offset),
            amount,
            status,
            urgency,
            time: None,
            notes: None,
            reminder: Reminder::OneDay,
        })?;
    }

    let boletos = [
        ("Condomínio", 650.0, 3i64, false),
        ("Energia", 230.0, 6, false),
        ("Plano de Saúde", 480.0, 12, true),
    ];
    for (name, amount, offset, paid) in boletos {
        backend.boleto_service.upsert_boleto(UpsertBoletoCommand {
            id: None,
            name: name.to_string(),
            amount,
            due_date: today + Duration::days(offset),
            paid,
        })?;
    }

    let posts = [
        (
            "Ana Beatriz",
            CommunityTopic::FinancasPessoais,
            "Finalmente completei 6 meses de reserva de emergência! A dica de automatizar a transferência no dia do salário mudou tudo.",
        ),
        (
            "Carlos Silva",
            CommunityTopic::Investimentos,
            "Alguém mais está aproveitando as taxas do Tesouro IPCA+ para metas de longo prazo?",
        ),
        (
            "Mariana Costa",
            CommunityTopic::PjMei,
            "Lembrete para quem é MEI: a DASN-SIMEI está chegando. Organizem as notas desde já!",
        ),
    ];
    for (author, topic, content) in posts {
        backend.community_service.create_post(CreatePostCommand {
            author: author.to_string(),
            author_avatar: None,
            topic,
            content: content.to_string(),
            attachment: None,
        })?;
    }

    Ok(())
}
