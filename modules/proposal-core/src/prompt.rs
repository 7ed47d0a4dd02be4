use proposal_common::GenerationContext;

/// The copywriting prompt. Inputs are embedded verbatim; the model is told to
/// answer with bare JSON in the shape of `ProposalContent`. Length targets are
/// requested here and never checked afterwards.
pub fn build_prompt(
    product_name: &str,
    price: &str,
    capacity: Option<&str>,
    context: &GenerationContext,
) -> String {
    let capacity = capacity.unwrap_or("");
    format!(
        r#"あなたはプロのセールスライターです。以下の商品情報をもとに、顧客（バイヤー）向けの提案書を作成するための情報をJSON形式で抽出・生成してください。
必ず有効なJSON形式で出力してください。Markdownのコードブロックは使用しないでください。JSON以外の文章は一切含めないでください。

【商品名】
{product_name}

【価格】
{price}

【容量】
{capacity}

【検索された背景情報】
{context}

【要件】
1. **catch_copy**: ひと目で興味を惹くキャッチコピー（20文字以内）。
2. **benefits**: 主要なベネフィットを3つ。
    - title: ベネフィットの見出し（15文字以内）
    - detail: 詳細説明（50文字以内）
3. **product_specs**: 商品の基本スペックや特徴を3〜5個の箇条書きで。
4. **comment**: バイヤーへの推薦コメント（100文字程度）。ベネフィットを要約し、熱意を持って勧める文章。
5. **target**: どのような顧客層に売れるか（例：30代主婦、健康志向の男性など）。

【出力JSONフォーマット】
{{
    "product_name": "{product_name}",
    "price": "{price}",
    "capacity": "{capacity}",
    "catch_copy": "...",
    "benefits": [
        {{"title": "...", "detail": "..."}},
        {{"title": "...", "detail": "..."}},
        {{"title": "...", "detail": "..."}}
    ],
    "product_specs": ["...", "..."],
    "comment": "...",
    "target": "..."
}}
"#,
        context = context.as_str(),
    )
}
