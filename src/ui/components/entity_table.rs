use dioxus::prelude::*;

use crate::domain::entities::entity::Entity;

const HEADER_CELL_STYLE: &str = "position: sticky; top: 0; background: #f5f5f5; border-bottom: 1px solid #ccc; padding: 6px 8px; text-align: left;";
const CELL_STYLE: &str = "border-bottom: 1px solid #eee; padding: 6px 8px;";

pub fn format_created_at(entity: &Entity) -> String {
    entity.created_at.format("%Y-%m-%d %H:%M").to_string()
}

#[component]
pub fn EntityTable(entities: Vec<Entity>, empty_label: String) -> Element {
    if entities.is_empty() {
        return rsx! {
            p { style: "color: #777;", "{empty_label}" }
        };
    }

    rsx! {
        div { style: "flex: 1; overflow: auto;",
            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        th { style: HEADER_CELL_STYLE, "Name" }
                        th { style: HEADER_CELL_STYLE, "Type" }
                        th { style: HEADER_CELL_STYLE, "Description" }
                        th { style: HEADER_CELL_STYLE, "Created" }
                    }
                }
                tbody {
                    for entity in entities.iter() {
                        tr { key: "{entity.id}",
                            td { style: CELL_STYLE, "{entity.name}" }
                            td { style: CELL_STYLE, {entity.kind.label()} }
                            td { style: CELL_STYLE, "{entity.description}" }
                            td { style: CELL_STYLE, {format_created_at(entity)} }
                        }
                    }
                }
            }
        }
    }
}
