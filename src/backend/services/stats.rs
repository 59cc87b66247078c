// src/backend/services/stats.rs
//
// Derived numbers shown on the dashboards. Recomputed from the full record on every call.

use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::models::common::{count_filled, ListItem};
use crate::models::{EmergencyInfo, UltimatePlanningData};
use crate::utils::money::{parse_amount, round_cents, sum_amounts};

pub const EMERGENCY_SECTIONS: u32 = 8;
pub const PLANNING_SECTIONS: u32 = 8;

/// `round(filled / total * 100)`, 0 when there is nothing to fill.
pub fn completion_percentage(filled: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(filled.min(total)) / f64::from(total) * 100.0).round();
    pct as u8
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EmergencyStats {
    pub reachable_contacts: u32,
    pub has_primary_contact: bool,
    pub dependents_count: u32,
    pub documents_count: u32,
    pub properties_count: u32,
    pub total_property_value: f64,
    pub total_mortgage_balance: f64,
    pub property_equity: f64,
    pub completed_sections: u32,
    pub total_sections: u32,
    pub pourcentage_completion: u8,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PlanningStats {
    pub credit_cards_count: u32,
    pub total_credit_limit: f64,
    pub total_credit_balance: f64,
    /// Balance over limit, in percent; 0 without any limit.
    pub credit_utilization: u8,
    pub bank_accounts_count: u32,
    pub total_bank_balance: f64,
    pub investments_count: u32,
    pub total_investments: f64,
    pub insurance_policies_count: u32,
    pub total_insurance_coverage: f64,
    pub digital_accounts_count: u32,
    pub professional_contacts_count: u32,
    /// Bank balances plus investments, minus credit card balances.
    pub net_worth_estimate: f64,
    pub completed_sections: u32,
    pub total_sections: u32,
    pub pourcentage_completion: u8,
}

fn filled_rows<I: ListItem>(items: &[I]) -> impl Iterator<Item = &I> {
    items.iter().filter(|row| !row.is_blank())
}

fn section_count(sections: &[bool]) -> u32 {
    sections.iter().filter(|done| **done).count() as u32
}

pub fn emergency_stats(info: &EmergencyInfo) -> EmergencyStats {
    let reachable_contacts = info.contacts.iter().filter(|c| c.is_reachable()).count() as u32;
    let dependents_count = count_filled(&info.dependents);
    let documents_count = count_filled(&info.documents);
    let properties_count = count_filled(&info.properties);

    let total_property_value =
        round_cents(sum_amounts(filled_rows(&info.properties).map(|p| p.estimated_value.as_str())));
    let total_mortgage_balance =
        round_cents(sum_amounts(filled_rows(&info.properties).map(|p| p.mortgage_balance.as_str())));

    let completed_sections = section_count(&[
        reachable_contacts > 0,
        info.medical_info.is_filled(),
        dependents_count > 0,
        documents_count > 0,
        properties_count > 0,
        info.financial_info.is_filled(),
        info.digital_access.is_filled(),
        info.insurance.is_filled(),
    ]);

    EmergencyStats {
        reachable_contacts,
        has_primary_contact: info.contacts.iter().any(|c| c.is_primary && c.is_reachable()),
        dependents_count,
        documents_count,
        properties_count,
        total_property_value,
        total_mortgage_balance,
        property_equity: round_cents(total_property_value - total_mortgage_balance),
        completed_sections,
        total_sections: EMERGENCY_SECTIONS,
        pourcentage_completion: completion_percentage(completed_sections, EMERGENCY_SECTIONS),
    }
}

pub fn planning_stats(data: &UltimatePlanningData) -> PlanningStats {
    let credit_cards_count = count_filled(&data.credit_cards);
    let bank_accounts_count = count_filled(&data.bank_accounts);
    let investments_count = count_filled(&data.investments);
    let insurance_policies_count = count_filled(&data.insurance_policies);
    let digital_accounts_count = count_filled(&data.digital_accounts);
    let professional_contacts_count = count_filled(&data.professional_contacts);

    let total_credit_limit =
        round_cents(sum_amounts(data.credit_cards.iter().map(|c| c.credit_limit.as_str())));
    let total_credit_balance =
        round_cents(sum_amounts(data.credit_cards.iter().map(|c| c.current_balance.as_str())));
    let total_bank_balance = round_cents(sum_amounts(data.bank_accounts.iter().map(|a| a.balance.as_str())));
    let total_investments =
        round_cents(sum_amounts(data.investments.iter().map(|i| i.current_value.as_str())));
    let total_insurance_coverage = round_cents(
        data.insurance_policies
            .iter()
            .map(|p| parse_amount(&p.coverage_amount))
            .sum(),
    );

    let credit_utilization = if total_credit_limit > 0.0 {
        (total_credit_balance / total_credit_limit * 100.0).round().clamp(0.0, 255.0) as u8
    } else {
        0
    };

    let completed_sections = section_count(&[
        data.succession_preferences.is_filled(),
        credit_cards_count > 0,
        bank_accounts_count > 0,
        investments_count > 0,
        insurance_policies_count > 0,
        digital_accounts_count > 0,
        professional_contacts_count > 0,
        data.funeral_wishes.is_filled(),
    ]);

    PlanningStats {
        credit_cards_count,
        total_credit_limit,
        total_credit_balance,
        credit_utilization,
        bank_accounts_count,
        total_bank_balance,
        investments_count,
        total_investments,
        insurance_policies_count,
        total_insurance_coverage,
        digital_accounts_count,
        professional_contacts_count,
        net_worth_estimate: round_cents(total_bank_balance + total_investments - total_credit_balance),
        completed_sections,
        total_sections: PLANNING_SECTIONS,
        pourcentage_completion: completion_percentage(completed_sections, PLANNING_SECTIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::emergency_info::{EmergencyContact, Property};
    use crate::models::ultimate_planning::{BankAccount, CreditCard};
    use crate::models::PlanRecord;

    #[test]
    fn percentage_formula() {
        assert_eq!(completion_percentage(0, 8), 0);
        assert_eq!(completion_percentage(4, 8), 50);
        assert_eq!(completion_percentage(8, 8), 100);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(3, 0), 0);
    }

    #[test]
    fn defaults_are_zero_percent() {
        let stats = emergency_stats(&EmergencyInfo::defaults());
        assert_eq!(stats.pourcentage_completion, 0);
        assert_eq!(stats.reachable_contacts, 0);
        assert_eq!(stats.dependents_count, 0);
        assert_eq!(planning_stats(&UltimatePlanningData::defaults()).pourcentage_completion, 0);
    }

    #[test]
    fn emergency_sections_count_reachable_contacts_and_property_equity() {
        let mut info = EmergencyInfo::defaults();
        info.contacts[0] = EmergencyContact {
            name: "Marie Tremblay".to_string(),
            phone: "514-555-0101".to_string(),
            is_primary: true,
            ..Default::default()
        };
        info.contacts[1].name = "Name only".to_string();
        info.properties.push(Property {
            address: "12 rue Principale".to_string(),
            estimated_value: "450 000,00 $".to_string(),
            mortgage_balance: "120 000 $".to_string(),
            ..Default::default()
        });

        let stats = emergency_stats(&info);
        assert_eq!(stats.reachable_contacts, 1);
        assert!(stats.has_primary_contact);
        assert_eq!(stats.properties_count, 1);
        assert_eq!(stats.property_equity, 330_000.0);
        assert_eq!(stats.completed_sections, 2);
        assert_eq!(stats.pourcentage_completion, 25);
    }

    #[test]
    fn planning_totals_and_utilization() {
        let mut data = UltimatePlanningData::defaults();
        data.credit_cards = vec![
            CreditCard {
                issuer: "Desjardins".to_string(),
                credit_limit: "5 000 $".to_string(),
                current_balance: "1 250,00 $".to_string(),
                ..Default::default()
            },
            CreditCard {
                issuer: "Banque Nationale".to_string(),
                credit_limit: "$5,000.00".to_string(),
                current_balance: "abc".to_string(),
                ..Default::default()
            },
        ];
        data.bank_accounts.push(BankAccount {
            institution: "Desjardins".to_string(),
            balance: "10 000,50".to_string(),
            ..Default::default()
        });

        let stats = planning_stats(&data);
        assert_eq!(stats.total_credit_balance, 1250.0);
        assert_eq!(stats.total_credit_limit, 10_000.0);
        assert_eq!(stats.credit_utilization, 13);
        assert_eq!(stats.net_worth_estimate, 8750.5);
        assert_eq!(stats.completed_sections, 2);
        assert_eq!(stats.pourcentage_completion, 25);
    }
}
