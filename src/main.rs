//! Fincast CLI
//!
//! Command-line interface for the household projection calculators

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use clap::{Parser, Subcommand};

use fincast::insights::{MortgageInsight, PensionAdequacy, SalaryInsight};
use fincast::mortgage::{RegulatoryFinding, TrackKind};
use fincast::tax::tables::EmploymentMode;
use fincast::wealth::rent_vs_buy::OwnerCosts;
use fincast::{PensionInput, RentVsBuyInput, SalaryInput, ScenarioRunner, TrackSpec};

#[derive(Parser)]
#[command(name = "fincast", version, about = "Deterministic household finance projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Multi-track mortgage amortization and early-repayment simulation
    Mortgage {
        /// Prime-track principal
        #[arg(long, default_value_t = 0.0)]
        prime: f64,
        #[arg(long, default_value_t = 5.5)]
        prime_rate: f64,

        /// Fixed unlinked track principal
        #[arg(long, default_value_t = 0.0)]
        fixed: f64,
        #[arg(long, default_value_t = 4.8)]
        fixed_rate: f64,

        /// Fixed CPI-linked track principal
        #[arg(long, default_value_t = 0.0)]
        indexed: f64,
        #[arg(long, default_value_t = 3.2)]
        indexed_rate: f64,

        /// Term in years, applied to every track
        #[arg(long, default_value_t = 25)]
        term_years: u32,

        /// Interest-only months at the start of every track
        #[arg(long, default_value_t = 0)]
        grace_months: u32,

        /// Assumed annual CPI for linked tracks, percent
        #[arg(long, default_value_t = 2.0)]
        cpi: f64,

        /// Net household income for the payment-to-income check
        #[arg(long)]
        net_income: Option<f64>,

        /// Extra payment added every month in the early-repayment run
        #[arg(long, default_value_t = 0.0)]
        extra_monthly: f64,

        /// One-off repayment amount
        #[arg(long, default_value_t = 0.0)]
        lump_sum: f64,

        /// Month the one-off repayment lands in
        #[arg(long, default_value_t = 12)]
        lump_sum_month: u32,

        /// Write the combined monthly schedule to this CSV path
        #[arg(long)]
        schedule_csv: Option<String>,

        /// Emit the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Gross-to-net salary decomposition
    Salary {
        /// Gross monthly salary
        #[arg(long)]
        gross: f64,

        #[arg(long)]
        self_employed: bool,

        /// Employee pension contribution, percent
        #[arg(long, default_value_t = 6.0)]
        pension_pct: f64,

        /// Employer pension contribution, percent
        #[arg(long, default_value_t = 6.5)]
        employer_pension_pct: f64,

        /// Employee study-fund contribution, percent
        #[arg(long, default_value_t = 0.0)]
        study_fund_pct: f64,

        /// Employer study-fund contribution, percent
        #[arg(long, default_value_t = 0.0)]
        employer_study_fund_pct: f64,

        #[arg(long, default_value_t = 2.25)]
        credit_points: f64,

        /// Monthly travel allowance, paid net
        #[arg(long, default_value_t = 0.0)]
        travel: f64,

        /// Monthly taxable company-car value
        #[arg(long, default_value_t = 0.0)]
        car_value: f64,

        #[arg(long)]
        json: bool,
    },

    /// Owner-vs-renter wealth comparison over a horizon
    RentVsBuy {
        #[arg(long)]
        price: f64,

        /// Cash equity put into the purchase
        #[arg(long)]
        equity: f64,

        #[arg(long, default_value_t = 4.5)]
        mortgage_rate: f64,

        #[arg(long, default_value_t = 25)]
        mortgage_term_years: u32,

        /// Annual property appreciation, percent
        #[arg(long, default_value_t = 3.0)]
        appreciation: f64,

        /// Monthly rent for the comparable home
        #[arg(long)]
        rent: f64,

        /// Annual rent growth, percent
        #[arg(long, default_value_t = 3.0)]
        rent_growth: f64,

        /// Annual return on the renter's invested surplus, percent
        #[arg(long, default_value_t = 6.0)]
        investment_return: f64,

        #[arg(long, default_value_t = 20)]
        horizon_years: u32,

        #[arg(long, default_value_t = 0.0)]
        municipal_tax: f64,

        #[arg(long, default_value_t = 0.0)]
        building_fee: f64,

        /// Tax the purchase at the additional-home tiers
        #[arg(long)]
        second_home: bool,

        #[arg(long)]
        json: bool,
    },

    /// Pension accumulation and retirement adequacy
    Pension {
        /// Current gross monthly salary
        #[arg(long)]
        salary: f64,

        /// Combined contribution, percent of salary
        #[arg(long, default_value_t = 18.5)]
        contribution_pct: f64,

        /// Savings already accumulated
        #[arg(long, default_value_t = 0.0)]
        balance: f64,

        /// Expected annual return, percent
        #[arg(long, default_value_t = 4.0)]
        return_rate: f64,

        /// Annual salary growth, percent
        #[arg(long, default_value_t = 2.0)]
        salary_growth: f64,

        /// Years until retirement
        #[arg(long)]
        years: u32,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let runner = ScenarioRunner::new();

    match cli.command {
        Command::Mortgage {
            prime,
            prime_rate,
            fixed,
            fixed_rate,
            indexed,
            indexed_rate,
            term_years,
            grace_months,
            cpi,
            net_income,
            extra_monthly,
            lump_sum,
            lump_sum_month,
            schedule_csv,
            json,
        } => {
            let term_months = term_years * 12;
            let specs = [
                TrackSpec {
                    kind: TrackKind::Prime,
                    principal: prime,
                    term_months,
                    annual_rate: prime_rate,
                    grace_months,
                },
                TrackSpec {
                    kind: TrackKind::FixedUnlinked,
                    principal: fixed,
                    term_months,
                    annual_rate: fixed_rate,
                    grace_months,
                },
                TrackSpec {
                    kind: TrackKind::FixedCpiLinked,
                    principal: indexed,
                    term_months,
                    annual_rate: indexed_rate,
                    grace_months,
                },
            ];
            let report = runner.run_mortgage(&specs, cpi, net_income)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("Mortgage ({} tracks, {} months)", report.tracks.len(), term_months);
            println!("{:>18} {:>14} {:>8} {:>12} {:>14} {:>14}",
                "Track", "Principal", "Rate", "First Pmt", "Total Paid", "Interest");
            println!("{}", "-".repeat(86));
            for t in &report.tracks {
                println!("{:>18} {:>14.2} {:>7.2}% {:>12.2} {:>14.2} {:>14.2}",
                    format!("{:?}", t.kind),
                    t.track.principal,
                    t.track.annual_rate,
                    t.result.first_payment,
                    t.result.total_paid,
                    t.result.total_interest,
                );
            }

            println!("\nSummary:");
            println!("  Total Principal: {:.2}", report.aggregate.total_principal);
            println!("  Total Paid:      {:.2}", report.aggregate.total_paid);
            println!("  Total Interest:  {:.2}", report.aggregate.total_interest);
            println!("  First Payment:   {:.2}", report.aggregate.first_month_payment);
            println!("  Peak Payment:    {:.2}", report.aggregate.max_month_payment);

            for finding in &report.findings {
                match finding {
                    RegulatoryFinding::VariableShareExceeded { share, limit } => println!(
                        "  WARNING: variable-rate share {:.1}% exceeds the {:.1}% cap",
                        share * 100.0,
                        limit * 100.0
                    ),
                    RegulatoryFinding::PaymentToIncomeExceeded { ratio, limit } => println!(
                        "  WARNING: payment takes {:.1}% of net income (cap {:.1}%)",
                        ratio * 100.0,
                        limit * 100.0
                    ),
                }
            }

            for insight in &report.insights {
                match insight {
                    MortgageInsight::HighInterestRatio { ratio, total_interest } => println!(
                        "  Note: interest is {:.0}% of principal ({:.0} total)",
                        ratio * 100.0,
                        total_interest
                    ),
                    MortgageInsight::EfficientMix { ratio } => println!(
                        "  Note: efficient mix, interest is only {:.0}% of principal",
                        ratio * 100.0
                    ),
                    MortgageInsight::IndexedExposure {
                        indexed_principal,
                        indexed_interest,
                    } => println!(
                        "  Note: {:.0} principal is CPI-linked ({:.0} projected interest)",
                        indexed_principal, indexed_interest
                    ),
                    MortgageInsight::TermShortening {
                        track_index,
                        from_years,
                        to_years,
                        saving,
                    } => println!(
                        "  Note: shortening track {} from {} to {} years would save about {:.0}",
                        track_index + 1,
                        from_years,
                        to_years,
                        saving
                    ),
                }
            }

            if extra_monthly > 0.0 || lump_sum > 0.0 {
                let outcome =
                    runner.run_early_repayment(&report, extra_monthly, lump_sum, lump_sum_month);
                println!("\nEarly repayment:");
                println!("  Interest Saved:  {:.2}", outcome.interest_saved);
                println!("  Months Saved:    {}", outcome.months_saved);
                println!("  New Term:        {} months", outcome.new_total_months);
                println!("  New Interest:    {:.2}", outcome.new_total_interest);
            }

            if let Some(path) = schedule_csv {
                let mut file = File::create(&path)
                    .with_context(|| format!("creating schedule file {path}"))?;
                writeln!(file, "Track,Month,Payment,Principal,Interest,Balance")?;
                for t in &report.tracks {
                    for entry in &t.result.schedule {
                        writeln!(
                            file,
                            "{:?},{},{:.2},{:.2},{:.2},{:.2}",
                            t.kind,
                            entry.month,
                            entry.payment,
                            entry.principal_portion,
                            entry.interest_portion,
                            entry.ending_balance,
                        )?;
                    }
                }
                println!("\nFull schedule written to: {path}");
            }
        }

        Command::Salary {
            gross,
            self_employed,
            pension_pct,
            employer_pension_pct,
            study_fund_pct,
            employer_study_fund_pct,
            credit_points,
            travel,
            car_value,
            json,
        } => {
            let input = SalaryInput {
                gross,
                mode: if self_employed {
                    EmploymentMode::SelfEmployed
                } else {
                    EmploymentMode::Employee
                },
                pension_employee_pct: pension_pct,
                pension_employer_pct: employer_pension_pct,
                study_fund_employee_pct: study_fund_pct,
                study_fund_employer_pct: employer_study_fund_pct,
                credit_points,
                travel_allowance: travel,
                company_car_value: car_value,
            };
            let report = runner.run_salary(&input);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let b = &report.breakdown;
            println!("Salary breakdown (gross {:.2})", b.gross);
            println!("  Taxable Income:     {:.2}", b.taxable_income);
            println!("  Income Tax:         {:.2} (before credit {:.2}, credit {:.2})",
                b.income_tax, b.income_tax_before_credit, b.credit_amount);
            println!("  National Insurance: {:.2}", b.national_insurance);
            println!("  Health Insurance:   {:.2}", b.health_insurance);
            println!("  Pension (employee): {:.2}", b.pension_employee);
            println!("  Study Fund:         {:.2}", b.study_fund_employee);
            println!("  Total Deductions:   {:.2}", b.total_deductions);
            println!("  Net Salary:         {:.2}", b.net_salary);
            println!("  Employer Cost:      {:.2}", b.employer_cost);
            println!("  Real Value:         {:.2}", b.real_value);
            println!("  Effective Rate:     {:.1}%", b.effective_rate_pct);
            println!("  Marginal Rate:      {:.0}%", b.marginal_rate * 100.0);

            for insight in &report.insights {
                match insight {
                    SalaryInsight::EffectiveDeductions {
                        deduction_rate_pct,
                        net_share_pct,
                    } => println!(
                        "  Note: levies take {:.1}% of gross, {:.1}% reaches your pocket",
                        deduction_rate_pct, net_share_pct
                    ),
                    SalaryInsight::PensionIncrease {
                        extra_monthly_contribution,
                        tax_saving,
                        net_cost,
                    } => println!(
                        "  Note: one more pension point ({:.0}/month) saves {:.0} in tax, net cost {:.0}",
                        extra_monthly_contribution, tax_saving, net_cost
                    ),
                    SalaryInsight::StudyFundBenefit {
                        annual_employer_contribution,
                    } => println!(
                        "  Note: employer study fund adds {:.0} of tax-advantaged savings per year",
                        annual_employer_contribution
                    ),
                    SalaryInsight::CompanyCarCost { monthly_tax_cost } => println!(
                        "  Note: the company car costs {:.0} in extra tax every month",
                        monthly_tax_cost
                    ),
                }
            }
        }

        Command::RentVsBuy {
            price,
            equity,
            mortgage_rate,
            mortgage_term_years,
            appreciation,
            rent,
            rent_growth,
            investment_return,
            horizon_years,
            municipal_tax,
            building_fee,
            second_home,
            json,
        } => {
            let input = RentVsBuyInput {
                purchase_price: price,
                equity,
                mortgage_annual_rate: mortgage_rate,
                mortgage_term_years,
                appreciation_rate: appreciation,
                owner_costs: OwnerCosts {
                    municipal_tax_monthly: municipal_tax,
                    building_fee_monthly: building_fee,
                    ..OwnerCosts::default()
                },
                sole_residence: !second_home,
                rent,
                rent_growth_rate: rent_growth,
                investment_return_rate: investment_return,
                horizon_years,
            };
            let outcome = runner.run_rent_vs_buy(&input);

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            println!("Rent vs buy over {horizon_years} years");
            println!("  Purchase Tax:     {:.2}", outcome.purchase_tax);
            println!("  Mortgage Amount:  {:.2}", outcome.mortgage_amount);
            println!("  Monthly Mortgage: {:.2}", outcome.monthly_mortgage);
            println!();
            println!("{:>5} {:>16} {:>16} {:>16} {:>16}",
                "Year", "Owner Wealth", "Property", "Balance", "Renter Wealth");
            println!("{}", "-".repeat(74));
            for (owner, renter) in outcome.owner_timeline.iter().zip(&outcome.renter_timeline) {
                println!("{:>5} {:>16.2} {:>16.2} {:>16.2} {:>16.2}",
                    owner.year,
                    owner.net_wealth,
                    owner.property_value,
                    owner.mortgage_balance,
                    renter.net_wealth,
                );
            }
            println!("\nFinal gap (owner - renter): {:.2}", outcome.wealth_gap());
        }

        Command::Pension {
            salary,
            contribution_pct,
            balance,
            return_rate,
            salary_growth,
            years,
            json,
        } => {
            let input = PensionInput {
                starting_salary: salary,
                contribution_rate_pct: contribution_pct,
                initial_balance: balance,
                annual_return_rate: return_rate,
                annual_salary_growth_rate: salary_growth,
                years,
            };
            let report = runner.run_pension(&input);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("Pension projection ({years} years)");
            println!("{:>5} {:>16} {:>16} {:>16}", "Year", "Balance", "Contributed", "Growth");
            println!("{}", "-".repeat(58));
            for row in &report.projection.timeline {
                println!("{:>5} {:>16.2} {:>16.2} {:>16.2}",
                    row.year, row.balance, row.contributions, row.growth);
            }

            let o = &report.outlook;
            println!("\nRetirement outlook:");
            println!("  Final Balance:     {:.2}", report.projection.final_balance);
            println!("  Monthly Pension:   {:.2}", o.monthly_pension);
            println!("  Last Salary:       {:.2}", o.last_salary);
            println!("  Replacement Ratio: {:.1}%", o.replacement_ratio_pct);
            match report.adequacy {
                PensionAdequacy::OnTrack { .. } => {
                    println!("  Status: on track for the 70% target")
                }
                PensionAdequacy::Improvable { .. } => println!(
                    "  Status: below target, shortfall {:.2}/month",
                    o.gap
                ),
                PensionAdequacy::AtRisk { .. } => println!(
                    "  Status: at risk, shortfall {:.2}/month",
                    o.gap
                ),
            }
        }
    }

    Ok(())
}
