//! Built-in pattern definitions
//!
//! Patterns are published at catalog build time and never mutated; user
//! variants are derived through custom patterns in the registry.

use serde_json::json;
use template_model::{
    ColorTokens, Complexity, PatternCategory, SpacingTokens, StyleTokens, TemplatePattern,
    TemplateSection, TemplateVariable, TypographyTokens, VariableType,
};

fn tokens(primary: &str, secondary: &str, font: &str) -> StyleTokens {
    StyleTokens {
        colors: ColorTokens {
            primary: Some(primary.to_string()),
            secondary: Some(secondary.to_string()),
            background: Some("#ffffff".to_string()),
            text: Some("#1a1a1a".to_string()),
            ..Default::default()
        },
        typography: TypographyTokens {
            font_family: Some(font.to_string()),
            heading_family: None,
            base_size_px: Some(16),
            line_height: Some(1.5),
        },
        spacing: SpacingTokens {
            section_gap: Some(2.0),
            paragraph_gap: Some(1.0),
        },
    }
}

fn business_proposal() -> TemplatePattern {
    TemplatePattern {
        id: "business-proposal".to_string(),
        name: "Business Proposal".to_string(),
        description: "A structured proposal with scope, deliverables, and pricing".to_string(),
        category: PatternCategory::Business,
        complexity: Complexity::Moderate,
        variables: vec![
            TemplateVariable::required("client_name", VariableType::Text)
                .with_description("The client the proposal is addressed to"),
            TemplateVariable::required("project_title", VariableType::Text),
            TemplateVariable::new("total_cost", VariableType::Number),
            TemplateVariable::new("deliverables", VariableType::Array),
            TemplateVariable::new("timeline_weeks", VariableType::Number)
                .with_default(json!(4)),
        ],
        sections: vec![
            TemplateSection::new(
                "header",
                "Header",
                "<h1>{{project_title}}</h1><p class=\"client\">Prepared for {{client_name}}</p>",
            )
            .with_order(1)
            .with_variables(vec!["project_title", "client_name"]),
            TemplateSection::new(
                "deliverables",
                "Deliverables",
                "<h2>Deliverables</h2><ul>{{#each deliverables}}<li>{{this}}</li>{{/each}}</ul>",
            )
            .with_order(2)
            .with_variables(vec!["deliverables"]),
            TemplateSection::new(
                "pricing",
                "Pricing",
                "<h2>Investment</h2><p>Total: <strong>${{total_cost}}</strong> \
                 over {{timeline_weeks}} weeks.</p>",
            )
            .with_order(3)
            .with_variables(vec!["total_cost", "timeline_weeks"]),
        ],
        styling: tokens("#1f3a5f", "#4a6fa5", "Georgia, serif"),
        use_case: "Pitching project work to a prospective business client".to_string(),
        tags: vec!["proposal".to_string(), "sales".to_string()],
    }
}

fn marketing_flyer() -> TemplatePattern {
    TemplatePattern {
        id: "marketing-flyer".to_string(),
        name: "Marketing Flyer".to_string(),
        description: "A single-page promotional flyer with headline and call to action"
            .to_string(),
        category: PatternCategory::Marketing,
        complexity: Complexity::Simple,
        variables: vec![
            TemplateVariable::required("headline", VariableType::Text),
            TemplateVariable::new("subheadline", VariableType::Text),
            TemplateVariable::new("call_to_action", VariableType::Text)
                .with_default(json!("Contact us today")),
            TemplateVariable::new("highlights", VariableType::Array),
        ],
        sections: vec![
            TemplateSection::new(
                "hero",
                "Hero",
                "<h1>{{headline}}</h1>{{#if subheadline}}<p class=\"sub\">{{subheadline}}</p>{{/if}}",
            )
            .with_order(1)
            .with_variables(vec!["headline", "subheadline"]),
            TemplateSection::new(
                "highlights",
                "Highlights",
                "<ul class=\"highlights\">{{#each highlights}}<li>{{this}}</li>{{/each}}</ul>",
            )
            .with_order(2)
            .with_variables(vec!["highlights"]),
            TemplateSection::new(
                "cta",
                "Call to Action",
                "<p class=\"cta\">{{call_to_action}}</p>",
            )
            .with_order(3)
            .with_variables(vec!["call_to_action"]),
        ],
        styling: tokens("#e63946", "#f4a261", "'Poppins', sans-serif"),
        use_case: "Promoting a product launch or marketing campaign event".to_string(),
        tags: vec!["flyer".to_string(), "promotion".to_string()],
    }
}

fn monthly_report() -> TemplatePattern {
    TemplatePattern {
        id: "monthly-report".to_string(),
        name: "Monthly Report".to_string(),
        description: "A recurring status report with metrics and narrative".to_string(),
        category: PatternCategory::Report,
        complexity: Complexity::Complex,
        variables: vec![
            TemplateVariable::required("report_month", VariableType::Text),
            TemplateVariable::required("author", VariableType::Text),
            TemplateVariable::new("summary", VariableType::Text),
            TemplateVariable::new("metrics", VariableType::Array),
            TemplateVariable::new("risks", VariableType::Array),
        ],
        sections: vec![
            TemplateSection::new(
                "title",
                "Title",
                "<h1>Monthly Report - {{report_month}}</h1><p>Prepared by {{author}}</p>",
            )
            .with_order(1)
            .with_variables(vec!["report_month", "author"]),
            TemplateSection::new(
                "summary",
                "Executive Summary",
                "{{#if summary}}<h2>Summary</h2><p>{{summary}}</p>{{/if}}",
            )
            .with_order(2)
            .with_variables(vec!["summary"]),
            TemplateSection::new(
                "metrics",
                "Key Metrics",
                "<h2>Key Metrics</h2><table>{{#each metrics}}<tr><td>{{label}}</td>\
                 <td>{{value}}</td></tr>{{/each}}</table>",
            )
            .with_order(3)
            .with_variables(vec!["metrics"]),
            TemplateSection::new(
                "risks",
                "Risks",
                "{{#if risks}}<h2>Risks</h2><ul>{{#each risks}}<li>{{this}}</li>{{/each}}</ul>{{/if}}",
            )
            .with_order(4)
            .with_variables(vec!["risks"]),
        ],
        styling: tokens("#0b3d91", "#6b7a8f", "Arial, sans-serif"),
        use_case: "Recurring status reporting to stakeholders and management".to_string(),
        tags: vec!["report".to_string(), "status".to_string()],
    }
}

fn formal_letter() -> TemplatePattern {
    TemplatePattern {
        id: "formal-letter".to_string(),
        name: "Formal Letter".to_string(),
        description: "A conventional business letter with salutation and signature"
            .to_string(),
        category: PatternCategory::Letter,
        complexity: Complexity::Simple,
        variables: vec![
            TemplateVariable::required("recipient_name", VariableType::Text),
            TemplateVariable::required("body", VariableType::Text),
            TemplateVariable::new("sender_name", VariableType::Text),
            TemplateVariable::new("date", VariableType::Date),
        ],
        sections: vec![
            TemplateSection::new(
                "opening",
                "Opening",
                "{{#if date}}<p class=\"date\">{{date}}</p>{{/if}}<p>Dear {{recipient_name}},</p>",
            )
            .with_order(1)
            .with_variables(vec!["date", "recipient_name"]),
            TemplateSection::new("body", "Body", "<p>{{body}}</p>")
                .with_order(2)
                .with_variables(vec!["body"]),
            TemplateSection::new(
                "signature",
                "Signature",
                "<p>Sincerely,<br/>{{sender_name}}</p>",
            )
            .with_order(3)
            .with_variables(vec!["sender_name"]),
        ],
        styling: tokens("#222222", "#555555", "'Times New Roman', serif"),
        use_case: "Formal correspondence such as cover letters and notices".to_string(),
        tags: vec!["letter".to_string(), "correspondence".to_string()],
    }
}

fn service_invoice() -> TemplatePattern {
    TemplatePattern {
        id: "service-invoice".to_string(),
        name: "Service Invoice".to_string(),
        description: "An itemized invoice with line items and totals".to_string(),
        category: PatternCategory::Invoice,
        complexity: Complexity::Moderate,
        variables: vec![
            TemplateVariable::required("invoice_number", VariableType::Text),
            TemplateVariable::required("client_name", VariableType::Text),
            TemplateVariable::new("line_items", VariableType::Array),
            TemplateVariable::new("total", VariableType::Number),
            TemplateVariable::new("due_date", VariableType::Date),
        ],
        sections: vec![
            TemplateSection::new(
                "header",
                "Header",
                "<h1>Invoice {{invoice_number}}</h1><p>Billed to: {{client_name}}</p>",
            )
            .with_order(1)
            .with_variables(vec!["invoice_number", "client_name"]),
            TemplateSection::new(
                "items",
                "Line Items",
                "<table class=\"items\">{{#each line_items}}<tr><td>{{description}}</td>\
                 <td>${{amount}}</td></tr>{{/each}}</table>",
            )
            .with_order(2)
            .with_variables(vec!["line_items"]),
            TemplateSection::new(
                "total",
                "Total",
                "<p class=\"total\">Total due: <strong>${{total}}</strong>\
                 {{#if due_date}} by {{due_date}}{{/if}}</p>",
            )
            .with_order(3)
            .with_variables(vec!["total", "due_date"]),
        ],
        styling: tokens("#2a9d8f", "#264653", "'Helvetica Neue', sans-serif"),
        use_case: "Billing clients for completed services and consulting work".to_string(),
        tags: vec!["invoice".to_string(), "billing".to_string()],
    }
}

fn company_newsletter() -> TemplatePattern {
    TemplatePattern {
        id: "company-newsletter".to_string(),
        name: "Company Newsletter".to_string(),
        description: "A multi-story newsletter with featured article and shorts".to_string(),
        category: PatternCategory::Newsletter,
        complexity: Complexity::Complex,
        variables: vec![
            TemplateVariable::required("edition_title", VariableType::Text),
            TemplateVariable::new("feature_title", VariableType::Text),
            TemplateVariable::new("feature_body", VariableType::Text),
            TemplateVariable::new("stories", VariableType::Array),
        ],
        sections: vec![
            TemplateSection::new(
                "masthead",
                "Masthead",
                "<h1>{{edition_title}}</h1>",
            )
            .with_order(1)
            .with_variables(vec!["edition_title"]),
            TemplateSection::new(
                "feature",
                "Feature",
                "{{#if feature_title}}<h2>{{feature_title}}</h2><p>{{feature_body}}</p>{{/if}}",
            )
            .with_order(2)
            .with_variables(vec!["feature_title", "feature_body"]),
            TemplateSection::new(
                "shorts",
                "Shorts",
                "{{#each stories}}<article><h3>{{title}}</h3><p>{{body}}</p></article>{{/each}}",
            )
            .with_order(3)
            .with_variables(vec!["stories"]),
        ],
        styling: tokens("#7b2cbf", "#9d4edd", "'Segoe UI', sans-serif"),
        use_case: "Internal company news and team updates sent each month".to_string(),
        tags: vec!["newsletter".to_string(), "internal".to_string()],
    }
}

/// All built-in patterns, in catalog order.
pub fn builtin_patterns() -> Vec<TemplatePattern> {
    vec![
        business_proposal(),
        marketing_flyer(),
        monthly_report(),
        formal_letter(),
        service_invoice(),
        company_newsletter(),
    ]
}
