mod create_annotated_tag;
mod create_lightweight_tag;
mod rev_parse_resolves_names;
mod show_refs_lists_heads_and_tags;
