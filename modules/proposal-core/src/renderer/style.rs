/// A4 portrait sheet. Everything outside `.container` is hidden when printing.
pub(crate) const STYLESHEET: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Noto+Sans+JP:wght@400;700&display=swap');

@page { size: A4 portrait; margin: 0; }

body {
    font-family: 'Noto Sans JP', sans-serif;
    line-height: 1.4;
    color: #333;
    background-color: #f4f6f8;
    margin: 0;
    padding: 20px;
    display: flex;
    justify-content: center;
    -webkit-print-color-adjust: exact;
    min-width: 210mm;
}

.container {
    width: 210mm;
    height: 296mm;
    box-sizing: border-box;
    background: #fff;
    padding: 35mm 20mm 20mm 20mm;
    margin: 0 auto;
    box-shadow: 0 10px 30px rgba(0,0,0,0.08);
    position: relative;
    overflow: hidden;
    display: flex;
    flex-direction: column;
}

@media print {
    body { background-color: #fff; padding: 0; }
    .container { width: 100%; height: 100%; margin: 0; box-shadow: none; }
    .no-print { display: none !important; }
}

h1 {
    color: #2c3e50;
    font-size: 24px;
    border-bottom: 2px solid #eee;
    padding-bottom: 10px;
    margin: 0 0 15px 0;
    text-align: center;
    letter-spacing: 0.05em;
}

.hero-section { display: flex; flex-direction: column; align-items: center; margin-bottom: 10px; flex-shrink: 0; }

.product-image img {
    max-width: 100%;
    height: 225px;
    object-fit: contain;
    border-radius: 8px;
    box-shadow: 0 4px 12px rgba(0,0,0,0.1);
}

.catch-copy {
    font-size: 20px;
    font-weight: bold;
    background: linear-gradient(45deg, #e74c3c, #c0392b);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
    text-align: center;
    margin: 25px 0 35px 0;
    padding: 0 5px;
    flex-shrink: 0;
}

.info-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 25px; margin-bottom: 25px; flex-grow: 1; }

.section-title {
    font-size: 15px;
    color: #34495e;
    border-left: 4px solid #3498db;
    padding-left: 10px;
    margin-bottom: 10px;
    font-weight: bold;
}

.benefit-card {
    background: #f8fbff;
    border-radius: 6px;
    padding: 12px;
    margin-bottom: 12px;
    border: 1px solid #e1e8ed;
    page-break-inside: avoid;
}
.benefit-title { color: #2980b9; font-weight: bold; font-size: 13px; margin-bottom: 4px; display: flex; align-items: center; }
.benefit-title::before { content: '✓'; margin-right: 6px; font-weight: bold; }
.benefit-detail { font-size: 11px; color: #555; }

.specs-box { background: #fafafa; padding: 15px; border-radius: 8px; border: 1px solid #eee; height: fit-content; }
.specs-box h3 { margin-top: 0; font-size: 16px; }
.specs-list { list-style: none; padding: 0; margin: 0; }
.specs-list li { margin-bottom: 6px; padding-bottom: 6px; border-bottom: 1px dashed #ddd; font-size: 11px; }
.specs-list li:last-child { border-bottom: none; }

.price-target-box { background: #2c3e50; color: white; padding: 12px; border-radius: 6px; margin-top: 15px; text-align: center; }
.price-group { color: #f1c40f; font-weight: bold; }
.price-label { font-size: 13px; }
.price-val { font-size: 20px; margin: 0 2px; }
.tax-label { font-size: 11px; }
.target-val { font-size: 11px; opacity: 0.9; margin-top: 4px; }

.comment-section {
    background: #fffbe6;
    padding: 20px;
    border-radius: 8px;
    position: relative;
    border: 1px solid #fae588;
    page-break-inside: avoid;
    flex-shrink: 0;
    margin-top: auto;
    margin-bottom: 10mm;
}
.comment-section::before {
    content: 'RECOMMEND';
    position: absolute;
    top: -10px;
    left: 20px;
    background: #f1c40f;
    color: #fff;
    padding: 3px 10px;
    font-size: 11px;
    font-weight: bold;
    border-radius: 4px;
}
.comment-text { font-style: italic; color: #5d5d5d; line-height: 1.6; font-size: 13px; }

.print-btn-container { position: fixed; top: 20px; right: 20px; z-index: 1000; }
.print-btn {
    background-color: #3498db;
    color: white;
    border: none;
    padding: 10px 20px;
    border-radius: 5px;
    font-weight: bold;
    cursor: pointer;
    box-shadow: 0 2px 5px rgba(0,0,0,0.2);
    font-size: 14px;
}
.print-btn:hover { background-color: #2980b9; }

.company-header {
    position: absolute;
    top: 10mm;
    right: 15mm;
    text-align: right;
    font-size: 9px;
    color: #555;
    line-height: 1.2;
}
.company-name { font-size: 11px; font-weight: bold; color: #333; margin-bottom: 2px; letter-spacing: 0.05em; }
"#;

/// Wires the print button; the sheet has no other script.
pub(crate) const PRINT_SCRIPT: &str =
    "document.getElementById('print-btn').addEventListener('click', function () { window.print(); });";
